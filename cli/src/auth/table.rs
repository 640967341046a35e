//! Fixed-width table of authentication tokens.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::auth::expiry::{format_remaining, parse_expiry};
use crate::auth::tokens::Authentication;

const ID_WIDTH: usize = 25;
const COLUMN_WIDTH: usize = 20;

/// Renders tokens as a table, one row per token in the order given.
///
/// The "Expires In" column shows the countdown from `now`. Expiry values
/// that cannot be parsed are shown as-is.
pub fn render_authentications(authentications: &[Authentication], now: DateTime<Utc>) -> String {
    let mut out = String::new();

    push_row(
        &mut out,
        ["ID", "Application", "Remote Addr", "Host", "Expires In"],
    );
    let dashes = [ID_WIDTH, COLUMN_WIDTH, COLUMN_WIDTH, COLUMN_WIDTH, COLUMN_WIDTH]
        .map(|width| "-".repeat(width));
    out.push_str(&dashes.join("-+-"));
    out.push('\n');

    for auth in authentications {
        let raw = auth.expires.as_deref();
        let expires = match parse_expiry(raw) {
            Some(expiry) => format_remaining(Some(expiry), now),
            None => match raw.map(str::trim).filter(|s| !s.is_empty()) {
                Some(unparsed) => {
                    tracing::debug!(id = %auth.id, expires = unparsed, "Unrecognized expiry format");
                    unparsed.to_string()
                }
                None => format_remaining(None, now),
            },
        };

        push_row(
            &mut out,
            [
                auth.id.as_str(),
                auth.application.as_str(),
                auth.remote_addr.as_str(),
                auth.hostname.as_str(),
                expires.as_str(),
            ],
        );
    }

    out
}

fn push_row(out: &mut String, [id, application, remote_addr, hostname, expires]: [&str; 5]) {
    // Writing to a String cannot fail.
    let _ = writeln!(
        out,
        "{id:<ID_WIDTH$} | {application:<COLUMN_WIDTH$} | {remote_addr:<COLUMN_WIDTH$} | \
         {hostname:<COLUMN_WIDTH$} | {expires:<COLUMN_WIDTH$}"
    );
}

//! Contact payload construction.
//!
//! Pure derivation of the decoration label and the pre-filled `mailto:`
//! link from an attributed author, the document text, and the selected
//! line. Rendering is the caller's responsibility.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

use crate::models::{Author, ContactPayload};

/// Inline color of the contact affordance.
pub const CONTACT_COLOR: &str = "#2aa198";

const LABEL_PREFIX: &str = "📣 Contact author: ";

/// Everything outside RFC 3986 unreserved gets percent-encoded, so the link
/// survives reserved characters in paths, names, and line content.
const MAILTO_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Build the label and `mailto:` link for an attributed line.
///
/// The body quotes the literal text of the selected 0-based line (shown
/// 1-based); a line past the end of the document quotes an empty line.
pub fn build_contact_payload(
    author: &Author,
    document_text: &str,
    line: u32,
    file_path: &str,
) -> ContactPayload {
    let subject = format!("About {}", file_path);
    let body = format!(
        "On line {}:\n\n> {}\n\n",
        line + 1,
        line_from_text(document_text, line)
    );

    ContactPayload {
        label_text: format!("{}{}", LABEL_PREFIX, author.person.display_name),
        mail_link: render_mailto_link(&author.person.email, &subject, &body),
    }
}

/// `mailto:<email>?subject=<pct>&body=<pct>` with RFC 3986 percent-encoding.
pub fn render_mailto_link(email: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email,
        utf8_percent_encode(subject, MAILTO_ENCODE_SET),
        utf8_percent_encode(body, MAILTO_ENCODE_SET),
    )
}

/// Literal text of a 0-based line, empty when out of range. Lines are split
/// on `\n`; a trailing `\r` is dropped so CRLF documents quote cleanly.
pub fn line_from_text(text: &str, line: u32) -> &str {
    text.split('\n')
        .nth(line as usize)
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Person;
    use percent_encoding::percent_decode_str;

    fn author(name: &str, email: &str) -> Author {
        Author {
            person: Person {
                display_name: name.to_string(),
                email: email.to_string(),
            },
        }
    }

    /// Split a mailto link back into (address, decoded subject, decoded body).
    fn parse_mailto(link: &str) -> (String, String, String) {
        let rest = link.strip_prefix("mailto:").expect("mailto scheme");
        let (address, query) = rest.split_once('?').expect("query part");
        let mut subject = None;
        let mut body = None;
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').expect("key=value");
            let decoded = percent_decode_str(value)
                .decode_utf8()
                .expect("valid utf8")
                .into_owned();
            match key {
                "subject" => subject = Some(decoded),
                "body" => body = Some(decoded),
                other => panic!("unexpected query key: {}", other),
            }
        }
        (address.to_string(), subject.unwrap(), body.unwrap())
    }

    #[test]
    fn label_names_the_author() {
        let payload = build_contact_payload(&author("Bob", "bob@example.com"), "a\nb\nc", 1, "x.rs");
        assert!(payload.label_text.contains("Bob"));
        assert!(payload.label_text.starts_with("📣 Contact author: "));
    }

    #[test]
    fn mailto_round_trips_subject_and_body() {
        let payload = build_contact_payload(
            &author("Alice", "alice@example.com"),
            "fn main() {}\nlet x = a && b;\n",
            1,
            "src/main.rs",
        );
        let (address, subject, body) = parse_mailto(&payload.mail_link);
        assert_eq!(address, "alice@example.com");
        assert_eq!(subject, "About src/main.rs");
        assert_eq!(body, "On line 2:\n\n> let x = a && b;\n\n");
    }

    #[test]
    fn reserved_characters_are_percent_encoded() {
        let link = render_mailto_link("a@b.c", "is this ok? yes & no", "x=1&y=2");
        let (_, query) = link.split_once('?').unwrap();
        // The only literal separators left are the two query delimiters
        assert_eq!(query.matches('&').count(), 1);
        assert!(!query.contains('?'));
        assert!(!query.contains(' '));
        assert!(query.contains("is%20this%20ok%3F%20yes%20%26%20no"));
        assert!(query.contains("x%3D1%26y%3D2"));
    }

    #[test]
    fn quoted_line_comes_from_document_text() {
        assert_eq!(line_from_text("a\nb\nc", 1), "b");
        assert_eq!(line_from_text("a\r\nb\r\nc", 1), "b");
    }

    #[test]
    fn out_of_range_line_quotes_an_empty_line() {
        let payload = build_contact_payload(&author("Bob", "bob@example.com"), "a\nb\nc", 5, "x.rs");
        let (_, _, body) = parse_mailto(&payload.mail_link);
        assert_eq!(body, "On line 6:\n\n> \n\n");
    }

    #[test]
    fn empty_document_does_not_panic() {
        assert_eq!(line_from_text("", 0), "");
        assert_eq!(line_from_text("", 3), "");
    }
}

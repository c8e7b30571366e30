//! Email Export
//!
//! Formats the thread as a numbered plain-text mail body.

use chrono::NaiveDate;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::item::Item;
use crate::settings::Settings;

/// Characters left untouched by JavaScript's `encodeURIComponent`
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Blank items are skipped; numbering counts only exported items.
pub fn email_body(items: &[Item], max_characters: usize) -> String {
    items
        .iter()
        .filter(|item| !item.text().trim().is_empty())
        .enumerate()
        .map(|(index, item)| {
            format!(
                "{})\n\n{}\n\n({} CHARACTERS REMAINING)\n\n",
                index + 1,
                item.text(),
                item.remaining_chars(max_characters).abs()
            )
        })
        .collect()
}

/// `mailto:` link with the subject dated `date`
pub fn mailto_link(items: &[Item], settings: &Settings, date: NaiveDate) -> String {
    let subject = format!("{} - {}", settings.export_subject_prefix, date.format("%Y-%m-%d"));
    let body = email_body(items, settings.max_characters);
    format!(
        "mailto:?subject={}&body={}",
        utf8_percent_encode(&subject, URI_COMPONENT),
        utf8_percent_encode(&body, URI_COMPONENT)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Drafts;

    fn drafts_with(texts: &[&str]) -> Drafts {
        let mut drafts = Drafts::with_defaults(texts.len());
        for (id, text) in (1..).zip(texts) {
            drafts.update_text(id, text.to_string()).unwrap();
        }
        drafts
    }

    #[test]
    fn test_body_skips_blank_and_renumbers() {
        let drafts = drafts_with(&["first", "   ", "second"]);
        let body = email_body(drafts.items(), 280);
        assert_eq!(
            body,
            "1)\n\nfirst\n\n(275 CHARACTERS REMAINING)\n\n2)\n\nsecond\n\n(274 CHARACTERS REMAINING)\n\n"
        );
    }

    #[test]
    fn test_over_limit_reports_absolute_value() {
        let drafts = drafts_with(&["abcdef"]);
        assert!(email_body(drafts.items(), 4).contains("(2 CHARACTERS REMAINING)"));
    }

    #[test]
    fn test_mailto_encoding() {
        let drafts = drafts_with(&["a b"]);
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        let link = mailto_link(drafts.items(), &Settings::default(), date);
        assert!(link.starts_with("mailto:?subject=Tweets%20-%202024-03-09&body=1)%0A%0Aa%20b"));
    }
}

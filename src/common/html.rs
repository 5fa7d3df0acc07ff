//! Small HTML post-processing helpers for text cells.

/// Wrap the ordinal suffix after a digit in `<sup>` tags, so "3rd" renders
/// as 3<sup>rd</sup>.
pub fn superscript_ordinals(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 16);
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(d) = c.to_digit(10) {
            let suffix = match d {
                1 => "st",
                2 => "nd",
                3 => "rd",
                _ => "th",
            };
            let after = &rest[1..];
            if after.starts_with(suffix) {
                out.push(c);
                out.push_str("<sup>");
                out.push_str(suffix);
                out.push_str("</sup>");
                rest = &after[suffix.len()..];
                continue;
            }
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out
}

/// Split text on blank lines and wrap each block in a `<p>` element.
pub fn paragraphs(text: &str) -> String {
    text.split("\n\n")
        .map(|block| format!("<p>{}</p>", block))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_ordinal_suffixes() {
        assert_eq!(superscript_ordinals("the 1st of May"), "the 1<sup>st</sup> of May");
        assert_eq!(superscript_ordinals("2nd and 3rd"), "2<sup>nd</sup> and 3<sup>rd</sup>");
        assert_eq!(superscript_ordinals("30th"), "30<sup>th</sup>");
    }

    #[test]
    fn multi_digit_ordinals_keep_leading_digits() {
        assert_eq!(superscript_ordinals("21st"), "21<sup>st</sup>");
        assert_eq!(superscript_ordinals("112th"), "112<sup>th</sup>");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(superscript_ordinals("first and worst"), "first and worst");
        assert_eq!(superscript_ordinals("route 66"), "route 66");
    }

    #[test]
    fn splits_paragraphs_on_blank_lines() {
        assert_eq!(paragraphs("one\n\ntwo"), "<p>one</p><p>two</p>");
        assert_eq!(paragraphs("single"), "<p>single</p>");
    }

    #[test]
    fn single_newlines_stay_inside_a_paragraph() {
        assert_eq!(paragraphs("a\nb\n\nc"), "<p>a\nb</p><p>c</p>");
    }
}

//! Split camel-cased identifiers into words.
//!
//! Characters fall into two classes: "upper" (ASCII uppercase letters and
//! ASCII digits) and "other" (everything else). The identifier is cut into
//! segments, each being either a run of other characters, or a run of upper
//! characters together with the run of other characters that follows it.
//! A segment that starts with two or more upper characters and continues with
//! other characters is an acronym followed by a capitalized word, and is split
//! one character before the end of its upper run:
//!
//! | identifier       | words                  |
//! |------------------|------------------------|
//! | `RequestTimeout` | `Request`, `Timeout`   |
//! | `HTTPServer`     | `HTTP`, `Server`       |
//! | `ID`             | `ID`                   |
//! | `log_level`      | `log_level`            |

fn is_upper(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit()
}

/// Split `ident` into words. An empty identifier yields itself as the only word.
pub fn split_words(ident: &str) -> Vec<&str> {
    let mut words = Vec::new();
    let mut rest = ident;

    while !rest.is_empty() {
        let upper_len = rest
            .char_indices()
            .find(|(_, c)| !is_upper(*c))
            .map_or(rest.len(), |(i, _)| i);
        let other_len = rest[upper_len..]
            .char_indices()
            .find(|(_, c)| is_upper(*c))
            .map_or(rest.len() - upper_len, |(i, _)| i);

        let (segment, tail) = rest.split_at(upper_len + other_len);
        // Upper characters are ASCII, so byte offsets count characters here.
        if upper_len >= 2 && other_len > 0 {
            let (acronym, word) = segment.split_at(upper_len - 1);
            words.push(acronym);
            words.push(word);
        } else {
            words.push(segment);
        }
        rest = tail;
    }

    if words.is_empty() {
        words.push(ident);
    }
    words
}

//! Splits a fetched content body into candidate resource records.
//!
//! Bodies arrive in three shapes: a single JSON object, newline-delimited
//! JSON (one object per line), or concatenated objects with no separator.
//! A body containing newlines is split strictly on line boundaries; a body
//! without newlines is scanned by brace depth, emitting a record each time
//! the depth returns to zero. The scanner is string-aware, so braces inside
//! JSON string literals never open or close a record.

/// Lazily split `body` into candidate records.
///
/// The returned iterator borrows `body` and is restartable by calling
/// [`split`] again. Blank records are skipped, never emitted.
pub fn split(body: &str) -> RecordSplit<'_> {
    let trimmed = body.trim();
    if trimmed.contains('\n') {
        RecordSplit {
            mode: Mode::Lines(trimmed.lines()),
        }
    } else {
        RecordSplit {
            mode: Mode::Depth(DepthScan::new(trimmed)),
        }
    }
}

/// Lazy iterator over the candidate records of one body.
pub struct RecordSplit<'a> {
    mode: Mode<'a>,
}

enum Mode<'a> {
    Lines(std::str::Lines<'a>),
    Depth(DepthScan<'a>),
}

impl<'a> Iterator for RecordSplit<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        match &mut self.mode {
            Mode::Lines(lines) => {
                for line in lines.by_ref() {
                    let record = line.trim();
                    if !record.is_empty() {
                        return Some(record);
                    }
                }
                None
            }
            Mode::Depth(scan) => scan.next_record(),
        }
    }
}

/// Brace-depth scanner for newline-free bodies.
///
/// Bytes between top-level objects are ignored. An unterminated trailing
/// object is still emitted as a candidate record so the decoder reports it
/// instead of it vanishing silently.
struct DepthScan<'a> {
    body: &'a str,
    pos: usize,
}

impl<'a> DepthScan<'a> {
    fn new(body: &'a str) -> Self {
        Self { body, pos: 0 }
    }

    fn next_record(&mut self) -> Option<&'a str> {
        let bytes = self.body.as_bytes();
        let mut start = None;
        let mut depth = 0usize;
        let mut in_string = false;
        let mut escaped = false;

        let mut i = self.pos;
        while i < bytes.len() {
            let byte = bytes[i];
            if in_string {
                if escaped {
                    escaped = false;
                } else if byte == b'\\' {
                    escaped = true;
                } else if byte == b'"' {
                    in_string = false;
                }
            } else {
                match byte {
                    // Quotes outside any object are stray bytes, not strings.
                    b'"' if start.is_some() => in_string = true,
                    b'{' => {
                        if depth == 0 {
                            start = Some(i);
                        }
                        depth += 1;
                    }
                    b'}' if depth > 0 => {
                        depth -= 1;
                        if depth == 0 {
                            if let Some(record_start) = start.take() {
                                self.pos = i + 1;
                                return Some(&self.body[record_start..=i]);
                            }
                        }
                    }
                    _ => {}
                }
            }
            i += 1;
        }

        self.pos = bytes.len();
        start.map(|record_start| &self.body[record_start..])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(body: &str) -> Vec<&str> {
        split(body).collect()
    }

    #[test]
    fn single_object_yields_one_record() {
        assert_eq!(
            collect(r#"{"resourceType":"Patient"}"#),
            vec![r#"{"resourceType":"Patient"}"#]
        );
    }

    #[test]
    fn newline_delimited_round_trip() {
        let records = [r#"{"a":1}"#, r#"{"b":2}"#, r#"{"c":3}"#];
        let body = records.join("\n");
        assert_eq!(collect(&body), records);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let body = "{\"a\":1}\n\n   \n{\"b\":2}\n";
        assert_eq!(collect(body), vec![r#"{"a":1}"#, r#"{"b":2}"#]);
    }

    #[test]
    fn concatenated_objects_split_on_depth_not_separator() {
        // A naive "}{" substitution would corrupt the nested boundary here.
        assert_eq!(
            collect(r#"{"a":{"b":1}}{"c":2}"#),
            vec![r#"{"a":{"b":1}}"#, r#"{"c":2}"#]
        );
    }

    #[test]
    fn braces_inside_string_literals_are_inert() {
        assert_eq!(
            collect(r#"{"a":"}{"}{"b":"{{"}"#),
            vec![r#"{"a":"}{"}"#, r#"{"b":"{{"}"#]
        );
    }

    #[test]
    fn escaped_quotes_do_not_end_strings() {
        assert_eq!(
            collect(r#"{"a":"say \"}{\" twice"}{"b":2}"#),
            vec![r#"{"a":"say \"}{\" twice"}"#, r#"{"b":2}"#]
        );
    }

    #[test]
    fn bytes_between_objects_are_ignored() {
        assert_eq!(
            collect(r#"{"a":1} , {"b":2}"#),
            vec![r#"{"a":1}"#, r#"{"b":2}"#]
        );
    }

    #[test]
    fn unterminated_trailing_object_is_surfaced() {
        assert_eq!(
            collect(r#"{"a":1}{"b":"#),
            vec![r#"{"a":1}"#, r#"{"b":"#]
        );
    }

    #[test]
    fn empty_body_yields_nothing() {
        assert!(collect("").is_empty());
        assert!(collect("   \n \n").is_empty());
    }

    #[test]
    fn restartable_from_the_original_body() {
        let body = r#"{"a":1}{"b":2}"#;
        let first: Vec<_> = split(body).collect();
        let second: Vec<_> = split(body).collect();
        assert_eq!(first, second);
    }
}

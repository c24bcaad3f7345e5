//! CSV tokenization
//!
//!     Spreadsheet exports are tokenized in two passes. A logos lexer splits the raw text
//!     into delimiter, record-end and field-piece tokens. The row assembler then stitches the
//!     pieces of each field back together and drops rows that carry no content.
//!
//! Quoting
//!
//!     A quoted piece may hold delimiters and record separators verbatim, and a doubled quote
//!     inside it is a literal quote. Pieces that touch belong to the same field, so quotes may
//!     open mid-field: `a"b,c"d` reads as the single field `ab,cd`.
//!
//!     Malformed quoting never fails. An opening quote without its closing partner swallows
//!     the rest of the input as field text.
//!
//! Records
//!
//!     `\n`, `\r\n` and a lone `\r` all end a record; `\r\n` is one separator. Rows made only
//!     of blank or whitespace fields are never emitted. Row lengths are not checked here,
//!     ragged rows are normalized downstream.

use logos::Logos;

/// One tokenized CSV document: rows of raw, unescaped field values.
pub type Rows = Vec<Vec<String>>;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsvToken {
    #[token(",")]
    Comma,

    #[regex(r"\r\n|\n|\r")]
    RecordEnd,

    /// A closed quoted piece, quotes included.
    #[regex(r#""([^"]|"")*""#)]
    Quoted,

    /// An opening quote that is never closed; runs to the end of input.
    #[regex(r#""([^"]|"")*"#)]
    Unterminated,

    #[regex(r#"[^",\r\n]+"#)]
    Bare,
}

/// Tokenize CSV text into rows of fields.
pub fn tokenize(text: &str) -> Rows {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();

    let mut lexer = CsvToken::lexer(text);
    while let Some(token) = lexer.next() {
        let slice = lexer.slice();
        match token {
            Ok(CsvToken::Comma) => row.push(std::mem::take(&mut field)),
            Ok(CsvToken::RecordEnd) => {
                row.push(std::mem::take(&mut field));
                push_row(&mut rows, std::mem::take(&mut row));
            }
            Ok(CsvToken::Quoted) => field.push_str(&unescape(&slice[1..slice.len() - 1])),
            Ok(CsvToken::Unterminated) => field.push_str(&unescape(&slice[1..])),
            // Every byte is covered by a token, keep the text should that ever change.
            Ok(CsvToken::Bare) | Err(()) => field.push_str(slice),
        }
    }

    row.push(field);
    push_row(&mut rows, row);
    rows
}

/// Tokenize raw feed bytes. Invalid UTF-8 is replaced and a leading byte order mark dropped.
pub fn tokenize_bytes(bytes: &[u8]) -> Rows {
    let text = String::from_utf8_lossy(bytes);
    tokenize(text.strip_prefix('\u{feff}').unwrap_or(&*text))
}

fn push_row(rows: &mut Rows, row: Vec<String>) {
    if row.iter().any(|field| !field.trim().is_empty()) {
        rows.push(row);
    }
}

/// Quotes inside a quoted piece only ever come in pairs.
fn unescape(inner: &str) -> String {
    inner.replace("\"\"", "\"")
}

//! Strict charset codec for response bodies.
//!
//! Decoding never substitutes replacement characters and encoding never
//! emits numeric character references: malformed input is an error.
//!
//! A plain `UTF-16` label leaves the byte order to the data: a leading byte
//! order mark picks little or big endian, unmarked bytes are big endian, and
//! encoding writes a big endian mark first.

use encoding_rs::{Encoding, UTF_16BE, UTF_16LE};

/// A resolved charset, remembering the label it was configured with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charset<'a> {
    label: &'a str,
    encoding: &'static Encoding,
    /// Byte order comes from the byte order mark
    unmarked_utf16: bool,
}

/// Big endian byte order mark.
const UTF_16BE_BOM: [u8; 2] = [0xfe, 0xff];

impl<'a> Charset<'a> {
    /// Resolve a WHATWG charset label (`UTF-8`, `ISO-8859-1`, `UTF-16LE`, ...).
    pub fn for_label(label: &'a str) -> Option<Self> {
        let label = label.trim();
        let unmarked_utf16 = label.eq_ignore_ascii_case("UTF-16");
        Encoding::for_label(label.as_bytes()).map(|encoding| Self {
            label,
            encoding: if unmarked_utf16 { UTF_16BE } else { encoding },
            unmarked_utf16,
        })
    }

    /// The label as configured.
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Canonical name of the resolved encoding.
    pub fn name(&self) -> &'static str {
        self.encoding.name()
    }

    /// Decode `bytes`, dropping a leading byte order mark.
    pub fn decode(&self, bytes: &[u8]) -> Option<String> {
        let (encoding, bytes) = match Encoding::for_bom(bytes) {
            Some((marked, bom_len)) if self.unmarked_utf16 && (marked == UTF_16LE || marked == UTF_16BE) => {
                (marked, &bytes[bom_len..])
            }
            _ => (self.encoding, bytes),
        };
        let text = encoding.decode_without_bom_handling_and_without_replacement(bytes)?;
        Some(text.strip_prefix('\u{feff}').unwrap_or(&*text).to_string())
    }

    /// Encode `text`, failing on characters the charset cannot represent.
    pub fn encode(&self, text: &str) -> Option<Vec<u8>> {
        // encoding_rs only encodes UTF-16 as UTF-8
        if self.encoding == UTF_16LE {
            return Some(text.encode_utf16().flat_map(u16::to_le_bytes).collect());
        }
        if self.encoding == UTF_16BE {
            let mut bytes = if self.unmarked_utf16 {
                UTF_16BE_BOM.to_vec()
            } else {
                Vec::new()
            };
            bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
            return Some(bytes);
        }

        let (bytes, used, unmappable) = self.encoding.encode(text);
        if unmappable || used != self.encoding {
            return None;
        }
        Some(bytes.into_owned())
    }
}

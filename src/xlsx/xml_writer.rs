//! Small XML writer used by the data-dependent part renderers

use crate::error::Result;
use std::io::Write;

/// XML declaration opening every part
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n";

/// Replace `& < > " '` with their entities.
///
/// The ampersand goes first so entities introduced by the later
/// replacements are not escaped twice.
pub fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Buffered XML writer
pub struct XmlWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    num_buffer: itoa::Buffer,
}

impl<W: Write> XmlWriter<W> {
    pub fn new(writer: W) -> Self {
        XmlWriter {
            writer,
            buffer: Vec::with_capacity(8192),
            num_buffer: itoa::Buffer::new(),
        }
    }

    /// Write raw bytes directly
    #[inline]
    pub fn write_raw(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        if self.buffer.len() > 4096 {
            self.flush()?;
        }
        Ok(())
    }

    /// Write string data without escaping
    #[inline]
    pub fn write_str(&mut self, s: &str) -> Result<()> {
        self.write_raw(s.as_bytes())
    }

    #[inline]
    pub fn write_int(&mut self, value: u64) -> Result<()> {
        let s = self.num_buffer.format(value);
        self.buffer.extend_from_slice(s.as_bytes());
        Ok(())
    }

    #[inline]
    pub fn declaration(&mut self) -> Result<()> {
        self.write_str(XML_DECLARATION)
    }

    /// Write XML element start tag, left open for attributes
    #[inline]
    pub fn start_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"<")?;
        self.write_str(name)
    }

    #[inline]
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"</")?;
        self.write_str(name)?;
        self.write_raw(b">")
    }

    /// Write self-closing element without attributes
    #[inline]
    pub fn empty_element(&mut self, name: &str) -> Result<()> {
        self.write_raw(b"<")?;
        self.write_str(name)?;
        self.write_raw(b"/>")
    }

    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) -> Result<()> {
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        self.write_escaped(value)?;
        self.write_raw(b"\"")
    }

    #[inline]
    pub fn attribute_int(&mut self, name: &str, value: u64) -> Result<()> {
        self.write_raw(b" ")?;
        self.write_str(name)?;
        self.write_raw(b"=\"")?;
        self.write_int(value)?;
        self.write_raw(b"\"")
    }

    /// Attribute with a decimal value in shortest round-trip form
    #[inline]
    pub fn attribute_num(&mut self, name: &str, value: f64) -> Result<()> {
        self.attribute(name, &value.to_string())
    }

    #[inline]
    pub fn close_start_tag(&mut self) -> Result<()> {
        self.write_raw(b">")
    }

    /// Close a start tag as a self-closing element
    #[inline]
    pub fn close_empty(&mut self) -> Result<()> {
        self.write_raw(b"/>")
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) -> Result<()> {
        for byte in text.bytes() {
            match byte {
                b'&' => self.buffer.extend_from_slice(b"&amp;"),
                b'<' => self.buffer.extend_from_slice(b"&lt;"),
                b'>' => self.buffer.extend_from_slice(b"&gt;"),
                b'"' => self.buffer.extend_from_slice(b"&quot;"),
                b'\'' => self.buffer.extend_from_slice(b"&apos;"),
                _ => self.buffer.push(byte),
            }
        }
        if self.buffer.len() > 4096 {
            self.flush()?;
        }
        Ok(())
    }

    /// Flush buffer to underlying writer
    pub fn flush(&mut self) -> Result<()> {
        if !self.buffer.is_empty() {
            self.writer.write_all(&self.buffer)?;
            self.buffer.clear();
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a part into a string using an [`XmlWriter`]
pub(crate) fn render_part<F>(build: F) -> Result<String>
where
    F: FnOnce(&mut XmlWriter<&mut Vec<u8>>) -> Result<()>,
{
    let mut output = Vec::with_capacity(4096);
    {
        let mut writer = XmlWriter::new(&mut output);
        build(&mut writer)?;
        writer.flush()?;
    }
    String::from_utf8(output).map_err(|e| {
        crate::error::ExportError::IoError(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e,
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_xml_writer() {
        let mut output = Vec::new();
        let mut writer = XmlWriter::new(&mut output);

        writer.start_element("row").unwrap();
        writer.attribute_int("r", 12).unwrap();
        writer.attribute_num("ht", 20.5).unwrap();
        writer.close_start_tag().unwrap();
        writer.write_str("content").unwrap();
        writer.end_element("row").unwrap();
        writer.flush().unwrap();

        assert_eq!(
            String::from_utf8(output).unwrap(),
            "<row r=\"12\" ht=\"20.5\">content</row>"
        );
    }

    #[test]
    fn test_escape_order() {
        assert_eq!(escape_xml("a & b"), "a &amp; b");
        assert_eq!(escape_xml("&lt;"), "&amp;lt;");
        assert_eq!(escape_xml("<\"'>"), "&lt;&quot;&apos;&gt;");
    }

    #[test]
    fn test_writer_escaping_matches_escape_xml() {
        let text = "Mc'Orta <b> & \"co\"";
        let mut output = Vec::new();
        let mut writer = XmlWriter::new(&mut output);
        writer.write_escaped(text).unwrap();
        writer.flush().unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), escape_xml(text));
    }

    #[test]
    fn test_render_part() {
        let xml = render_part(|w| w.empty_element("sheetData")).unwrap();
        assert_eq!(xml, "<sheetData/>");
    }
}

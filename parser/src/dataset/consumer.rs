//! Consumers of attribute values.
//!
//! The [`AttributeReader`] decides where each value starts and ends,
//! while a [`ValueConsumer`] decides what to do with it:
//! [`TreeBuilder`] keeps everything in the attribute tree,
//! [`DumpConsumer`] prints a line per attribute, item and fragment.

use crate::dataset::read::{AttributeReader, Result, WriteDumpSnafu};
use dcmio_core::dictionary::DataDictionary;
use dcmio_core::header::Length;
use dcmio_core::value::num;
use dcmio_core::{Attribute, Fragments, ItemSet, Sequence, VR};
use snafu::ResultExt;
use std::io::Write;

/// A receiver of the values found by an [`AttributeReader`].
///
/// Each method is called when the reader is positioned
/// at the start of the corresponding value,
/// and must either read or skip it through the reader.
pub trait ValueConsumer {
    /// Called once before the first attribute of a data set.
    fn start_dataset<D: DataDictionary>(&mut self, _reader: &mut AttributeReader<'_, D>) -> Result<()> {
        Ok(())
    }

    /// Consume the value of the reader's current attribute,
    /// which belongs to `set`.
    fn read_attribute_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        set: &mut ItemSet,
    ) -> Result<()>;

    /// Consume the item just announced in the current sequence.
    fn read_sequence_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        sequence: &mut Sequence,
    ) -> Result<()>;

    /// Consume the fragment just announced in the current attribute.
    fn read_fragment_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        fragments: &mut Fragments,
    ) -> Result<()>;

    /// Called once after the last attribute of a data set.
    fn end_dataset<D: DataDictionary>(&mut self, _reader: &mut AttributeReader<'_, D>) -> Result<()> {
        Ok(())
    }
}

impl<T: ?Sized + ValueConsumer> ValueConsumer for &mut T {
    fn start_dataset<D: DataDictionary>(&mut self, reader: &mut AttributeReader<'_, D>) -> Result<()> {
        (**self).start_dataset(reader)
    }

    fn read_attribute_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        set: &mut ItemSet,
    ) -> Result<()> {
        (**self).read_attribute_value(reader, set)
    }

    fn read_sequence_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        sequence: &mut Sequence,
    ) -> Result<()> {
        (**self).read_sequence_value(reader, sequence)
    }

    fn read_fragment_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        fragments: &mut Fragments,
    ) -> Result<()> {
        (**self).read_fragment_value(reader, fragments)
    }

    fn end_dataset<D: DataDictionary>(&mut self, reader: &mut AttributeReader<'_, D>) -> Result<()> {
        (**self).end_dataset(reader)
    }
}

/// Builds the attribute tree out of every value read.
#[derive(Debug, Default, Copy, Clone)]
pub struct TreeBuilder;

impl ValueConsumer for TreeBuilder {
    fn read_attribute_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        set: &mut ItemSet,
    ) -> Result<()> {
        let value = reader.read_attribute_value(self)?;
        // the value representation may change while reading
        if let Some(current) = reader.current() {
            set.put(Attribute::new(current.tag(), current.vr(), value));
        }
        Ok(())
    }

    fn read_sequence_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        sequence: &mut Sequence,
    ) -> Result<()> {
        let item = reader.read_item(self)?;
        sequence.push(item);
        Ok(())
    }

    fn read_fragment_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        fragments: &mut Fragments,
    ) -> Result<()> {
        let fragment = reader.read_fragment()?;
        fragments.push(fragment);
        Ok(())
    }
}

/// Values up to this length are shown in the dump.
const MAX_PREVIEW_LEN: u32 = 64;

/// Prints a line of text per attribute, item and fragment,
/// without keeping the values.
/// Private creators are kept in their item set,
/// so that the private attributes after them can be named.
///
/// Lines are indented by two spaces per nesting level:
///
/// ```text
/// (0008,1140) SQ #-1 ReferencedImageSequence
///   (FFFE,E000) #12 Item #1
///     (0008,1150) UI #4 [1.2] ReferencedSOPClassUID
/// (0028,0010) US #2 [512] Rows
/// (7FE0,0010) OB #-1 PixelData
///   (FFFE,E000) #4 Fragment #1
/// ```
#[derive(Debug)]
pub struct DumpConsumer<W> {
    to: W,
    items: Vec<usize>,
    fragments: usize,
}

impl<W: Write> DumpConsumer<W> {
    /// Print to the given writer.
    pub fn new(to: W) -> Self {
        DumpConsumer {
            to,
            items: Vec::new(),
            fragments: 0,
        }
    }

    /// Retrieve the writer.
    pub fn into_inner(self) -> W {
        self.to
    }

    /// Indent by two spaces per level.
    fn indent(&mut self, levels: usize) -> Result<()> {
        for _ in 0..levels {
            self.to.write_all(b"  ").context(WriteDumpSnafu)?;
        }
        Ok(())
    }
}

fn length_text(len: Length) -> String {
    match len.get() {
        Some(len) => len.to_string(),
        None => "-1".to_string(),
    }
}

fn preview(vr: VR, bytes: &[u8], big_endian: bool) -> String {
    if vr.is_textual() {
        let text = String::from_utf8_lossy(bytes);
        text.trim_end_matches(|c| c == ' ' || c == '\0').to_string()
    } else if let Some(ints) = num::read_ints(vr, bytes, big_endian) {
        ints.iter()
            .map(i64::to_string)
            .collect::<Vec<_>>()
            .join("\\")
    } else {
        bytes
            .iter()
            .map(|b| format!("{:02X}", b))
            .collect::<Vec<_>>()
            .join("\\")
    }
}

impl<W: Write> ValueConsumer for DumpConsumer<W> {
    fn read_attribute_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        set: &mut ItemSet,
    ) -> Result<()> {
        let current = match reader.current() {
            Some(current) => current.clone(),
            None => return Ok(()),
        };
        let alias = reader.dictionary_alias(&current).unwrap_or_default();
        self.indent(2 * reader.item_pointers().len())?;
        write!(
            self.to,
            "{} {} #{}",
            current.tag(),
            current.vr(),
            length_text(current.len())
        )
        .context(WriteDumpSnafu)?;

        if current.is_sequence() || current.len().is_undefined() {
            writeln!(self.to, " {}", alias).context(WriteDumpSnafu)?;
            self.items.push(0);
            self.fragments = 0;
            let result = if current.is_sequence() {
                reader.read_sequence(self).map(drop)
            } else {
                reader.read_fragments(self).map(drop)
            };
            self.items.pop();
            return result;
        }

        let keep = current.tag().is_private_creator();
        match current.len().get() {
            Some(len) if len > 0 && (keep || len <= MAX_PREVIEW_LEN) => {
                let value = reader.read_value()?;
                match value.bytes() {
                    Some(bytes) => write!(
                        self.to,
                        " [{}]",
                        preview(current.vr(), bytes, reader.is_big_endian())
                    ),
                    None => write!(self.to, " [{:?}]", value),
                }
                .context(WriteDumpSnafu)?;
                if keep {
                    set.put(Attribute::new(current.tag(), current.vr(), value));
                }
            }
            Some(0) => {}
            _ => reader.skip_value()?,
        }
        writeln!(self.to, " {}", alias).context(WriteDumpSnafu)
    }

    fn read_sequence_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        _sequence: &mut Sequence,
    ) -> Result<()> {
        let index = match self.items.last_mut() {
            Some(index) => {
                *index += 1;
                *index
            }
            None => 1,
        };
        let len = reader.pending_len().unwrap_or(Length::UNDEFINED);
        // one level below its sequence
        self.indent(2 * reader.item_pointers().len() - 1)?;
        writeln!(self.to, "(FFFE,E000) #{} Item #{}", length_text(len), index)
            .context(WriteDumpSnafu)?;
        reader.read_item(self).map(drop)
    }

    fn read_fragment_value<D: DataDictionary>(
        &mut self,
        reader: &mut AttributeReader<'_, D>,
        _fragments: &mut Fragments,
    ) -> Result<()> {
        self.fragments += 1;
        self.indent(2 * reader.item_pointers().len() + 1)?;
        let len = reader.skip_fragment()?;
        writeln!(self.to, "(FFFE,E000) #{} Fragment #{}", len, self.fragments)
            .context(WriteDumpSnafu)
    }

    fn end_dataset<D: DataDictionary>(&mut self, _reader: &mut AttributeReader<'_, D>) -> Result<()> {
        self.to.flush().context(WriteDumpSnafu)
    }
}

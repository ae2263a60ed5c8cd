//! The attribute stream writer.
//!
//! An [`AttributeWriter`] encodes item sets in a transfer syntax,
//! computing the lengths of sequences and items ahead of writing them
//! (or leaving them undefined, closed by delimiters),
//! converting values to the byte order of the output
//! and resolving bulk data references.
use crate::bulk::{BulkDataSource, FileBulkDataSource};
use crate::dataset::read::PASSTHROUGH_LEN;
use crate::stateful::encode::{Error as EncoderError, StatefulEncoder};
use dcmio_core::header::{DataElementHeader, Length};
use dcmio_core::{Attribute, BulkData, Fragment, Fragments, ItemSet, Sequence, Tag, Value, VR};
use dcmio_encoding::transfer_syntax::TransferSyntax;
use snafu::{ensure, Backtrace, ResultExt, Snafu};
use std::borrow::Cow;
use std::io::Write;
use tracing::warn;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not create encoder"))]
    CreateEncoder {
        #[snafu(backtrace)]
        source: EncoderError,
    },
    #[snafu(display("Could not write header of {}", tag))]
    WriteHeader {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncoderError,
    },
    #[snafu(display("Could not write value of {}", tag))]
    WriteValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: EncoderError,
    },
    #[snafu(display("Could not open bulk data {} of {}", locator, tag))]
    OpenBulkData {
        tag: Tag,
        locator: String,
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Value of {} is too long to encode ({} bytes)", tag, len))]
    ValueTooLong {
        tag: Tag,
        len: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Value of {} was computed to take {} bytes but {} were written",
        tag,
        computed,
        written
    ))]
    LengthMismatch {
        tag: Tag,
        computed: u64,
        written: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not finish writing"))]
    Finish {
        #[snafu(backtrace)]
        source: EncoderError,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The encoded size of a value,
/// with the sizes of the attributes in each of its items.
#[derive(Debug)]
struct Measure {
    /// the length declared in the header
    len: Length,
    /// the bytes following the header
    total: u64,
    items: Vec<ItemMeasure>,
}

#[derive(Debug)]
struct ItemMeasure {
    len: u64,
    attributes: Vec<Measure>,
}

/// How the length of a sequence or item is encoded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LengthEncoding {
    /// The length is computed before writing and declared in the header.
    Defined,
    /// The length is undefined and the content is closed by a delimiter.
    Undefined,
}

/// Options for writing attribute streams.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct WriteOptions {
    /// How sequence lengths are encoded.
    pub sequence_length: LengthEncoding,
    /// How item lengths are encoded.
    pub item_length: LengthEncoding,
    /// Whether bulk data references are written as passthrough references
    /// instead of copying the referenced bytes.
    pub bulk_data_passthrough: bool,
}

impl Default for WriteOptions {
    fn default() -> Self {
        WriteOptions {
            sequence_length: LengthEncoding::Undefined,
            item_length: LengthEncoding::Undefined,
            bulk_data_passthrough: false,
        }
    }
}

impl WriteOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how sequence lengths are encoded.
    pub fn sequence_length(mut self, encoding: LengthEncoding) -> Self {
        self.sequence_length = encoding;
        self
    }

    /// Set how item lengths are encoded.
    pub fn item_length(mut self, encoding: LengthEncoding) -> Self {
        self.item_length = encoding;
        self
    }

    /// Declare all sequence and item lengths.
    pub fn defined_lengths(self) -> Self {
        self.sequence_length(LengthEncoding::Defined)
            .item_length(LengthEncoding::Defined)
    }

    /// Set whether bulk data references are passed through.
    pub fn bulk_data_passthrough(mut self, passthrough: bool) -> Self {
        self.bulk_data_passthrough = passthrough;
        self
    }
}

fn even(len: u64) -> u64 {
    len + (len & 1)
}

/// A writer of attribute streams.
#[derive(Debug)]
pub struct AttributeWriter<'w> {
    encoder: StatefulEncoder<'w>,
    options: WriteOptions,
    source: Box<dyn BulkDataSource + 'w>,
}

impl<'w> AttributeWriter<'w> {
    /// Create a writer to `to` in the given transfer syntax.
    pub fn new<W>(to: W, ts: &TransferSyntax, options: WriteOptions) -> Result<Self>
    where
        W: Write + 'w,
    {
        let encoder = StatefulEncoder::new(to, ts).context(CreateEncoderSnafu)?;
        Ok(AttributeWriter {
            encoder,
            options,
            source: Box::new(FileBulkDataSource),
        })
    }

    /// Resolve bulk data references through the given source
    /// instead of the local file system.
    pub fn with_bulk_data_source(mut self, source: impl BulkDataSource + 'w) -> Self {
        self.source = Box::new(source);
        self
    }

    /// The writing options.
    pub fn options(&self) -> &WriteOptions {
        &self.options
    }

    /// The number of bytes written, before compression.
    pub fn bytes_written(&self) -> u64 {
        self.encoder.bytes_written()
    }

    /// The current transfer syntax.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        self.encoder.transfer_syntax()
    }

    /// Continue writing in another transfer syntax.
    pub fn switch_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        self.encoder
            .switch_transfer_syntax(ts)
            .context(CreateEncoderSnafu)
    }

    /// Write all attributes of an item set, in their order,
    /// converting values to the byte order of the output.
    pub fn write_dataset(&mut self, set: &ItemSet) -> Result<()> {
        let set = self.in_output_order(set);
        for attr in set.iter() {
            self.write_attribute(attr)?;
        }
        Ok(())
    }

    /// The number of bytes that the attributes of `set` take
    /// when written by this writer.
    pub fn encoded_len(&self, set: &ItemSet) -> Result<u64> {
        Ok(self.measure_item(set)?.len)
    }

    /// Write one attribute, assumed to be in the byte order of the output.
    pub fn write_attribute(&mut self, attr: &Attribute) -> Result<()> {
        let measure = self.measure_value(attr.tag(), attr.value())?;
        self.write_measured(attr, &measure)
    }

    /// Write an attribute header,
    /// returning the value representation actually written.
    ///
    /// An explicit short form value representation
    /// cannot declare more than `0xFFFF` bytes,
    /// so such values are written as `UN`.
    pub fn write_header(&mut self, tag: Tag, vr: VR, len: Length) -> Result<VR> {
        let vr = self.header_vr(tag, vr, len);
        self.encoder
            .encode_element_header(DataElementHeader::new(tag, vr, len))
            .context(WriteHeaderSnafu { tag })?;
        Ok(vr)
    }

    /// Write the value of an attribute after its header.
    pub fn write_value(&mut self, tag: Tag, vr: VR, value: &Value) -> Result<()> {
        match value {
            Value::Empty => Ok(()),
            Value::Bytes(bytes) => self
                .encoder
                .write_bytes(bytes, vr.padding())
                .context(WriteValueSnafu { tag }),
            Value::BulkData(bulk) if self.options.bulk_data_passthrough => {
                self.write_passthrough(tag, bulk)
            }
            Value::BulkData(bulk) => self.copy_bulk_data(tag, vr, bulk),
            Value::Sequence(sequence) => {
                let measure = self.measure_value(tag, value)?;
                self.write_sequence(tag, sequence, &measure.items)
            }
            Value::Fragments(fragments) => self.write_fragments(tag, vr, fragments),
        }
    }

    /// Complete the output,
    /// finishing the compressor if there is one.
    pub fn finish(self) -> Result<()> {
        self.encoder.finish().context(FinishSnafu)
    }

    fn in_output_order<'a>(&self, set: &'a ItemSet) -> Cow<'a, ItemSet> {
        let big_endian = self.encoder.is_big_endian();
        if set.is_big_endian() == big_endian {
            Cow::Borrowed(set)
        } else {
            Cow::Owned(set.to_byte_order(big_endian))
        }
    }

    /// Write an attribute whose value was measured beforehand.
    fn write_measured(&mut self, attr: &Attribute, measure: &Measure) -> Result<()> {
        let tag = attr.tag();
        let vr = self.write_header(tag, value_vr(attr), measure.len)?;
        let start = self.encoder.bytes_written();
        match attr.value() {
            Value::Sequence(sequence) => self.write_sequence(tag, sequence, &measure.items)?,
            value => self.write_value(tag, vr, value)?,
        }
        self.check_written(tag, start, measure.total)
    }

    fn write_sequence(
        &mut self,
        tag: Tag,
        sequence: &Sequence,
        measures: &[ItemMeasure],
    ) -> Result<()> {
        for (item, measure) in sequence.items().iter().zip(measures) {
            let item = self.in_output_order(item);
            let defined = self.options.item_length == LengthEncoding::Defined;
            let len = if defined {
                to_u32(tag, measure.len)?
            } else {
                Length::UNDEFINED.0
            };
            self.encoder
                .encode_item_header(len)
                .context(WriteValueSnafu { tag })?;
            let start = self.encoder.bytes_written();
            for (attr, measure) in item.iter().zip(&measure.attributes) {
                self.write_measured(attr, measure)?;
            }
            if defined {
                self.check_written(tag, start, measure.len)?;
            } else {
                self.encoder
                    .encode_item_delimiter()
                    .context(WriteValueSnafu { tag })?;
            }
        }
        if self.options.sequence_length == LengthEncoding::Undefined {
            self.encoder
                .encode_sequence_delimiter()
                .context(WriteValueSnafu { tag })?;
        }
        Ok(())
    }

    fn write_fragments(&mut self, tag: Tag, vr: VR, fragments: &Fragments) -> Result<()> {
        for fragment in fragments.fragments() {
            let len = to_u32(tag, even(fragment.len()))?;
            self.encoder
                .encode_item_header(len)
                .context(WriteValueSnafu { tag })?;
            match fragment {
                Fragment::Bytes(bytes) => self
                    .encoder
                    .write_bytes(bytes, 0)
                    .context(WriteValueSnafu { tag })?,
                Fragment::BulkData(bulk) => self.copy_bulk_data(tag, vr, bulk)?,
            }
        }
        self.encoder
            .encode_sequence_delimiter()
            .context(WriteValueSnafu { tag })
    }

    fn copy_bulk_data(&mut self, tag: Tag, vr: VR, bulk: &BulkData) -> Result<()> {
        let mut value = self
            .source
            .open(bulk)
            .context(OpenBulkDataSnafu {
                tag,
                locator: bulk.locator(),
            })?;
        let swap_unit = if bulk.is_big_endian() != self.encoder.is_big_endian() {
            vr.swap_unit()
        } else {
            0
        };
        self.encoder
            .copy_bytes(tag, &mut value, bulk.length(), swap_unit, vr.padding())
            .context(WriteValueSnafu { tag })
    }

    fn write_passthrough(&mut self, tag: Tag, bulk: &BulkData) -> Result<()> {
        let locator = bulk.locator();
        let flags = u16::from(bulk.is_big_endian());
        self.encoder
            .encode_u16(flags)
            .and_then(|_| self.encoder.encode_u32(locator.len() as u32))
            .and_then(|_| self.encoder.write_bytes(locator.as_bytes(), 0))
            .context(WriteValueSnafu { tag })
    }

    fn check_written(&self, tag: Tag, start: u64, computed: u64) -> Result<()> {
        let written = self.encoder.bytes_written() - start;
        ensure!(
            written == computed,
            LengthMismatchSnafu {
                tag,
                computed,
                written
            }
        );
        Ok(())
    }

    fn header_vr(&self, tag: Tag, vr: VR, len: Length) -> VR {
        let explicit = self.encoder.transfer_syntax().is_explicit_vr();
        match len.get() {
            Some(len) if explicit && vr.has_short_length() && len > 0xFFFF => {
                warn!(
                    "Value of {} is too long for {} ({} bytes), writing it as UN",
                    tag, vr, len
                );
                VR::UN
            }
            _ => vr,
        }
    }

    /// The bytes taken by an item's attributes, headers included.
    ///
    /// Byte order does not change sizes,
    /// so items are measured as they are.
    fn measure_item(&self, item: &ItemSet) -> Result<ItemMeasure> {
        let mut len = 0;
        let mut attributes = Vec::with_capacity(item.len());
        for attr in item.iter() {
            let measure = self.measure_value(attr.tag(), attr.value())?;
            let vr = self.header_vr(attr.tag(), value_vr(attr), measure.len);
            len += u64::from(self.encoder.header_len(vr)) + measure.total;
            attributes.push(measure);
        }
        Ok(ItemMeasure { len, attributes })
    }

    fn measure_value(&self, tag: Tag, value: &Value) -> Result<Measure> {
        let (len, total, items) = match value {
            Value::Empty => (Length(0), 0, Vec::new()),
            Value::Bytes(bytes) => {
                let len = even(bytes.len() as u64);
                (Length(to_u32(tag, len)?), len, Vec::new())
            }
            Value::BulkData(bulk) if self.options.bulk_data_passthrough => {
                let len = 6 + even(bulk.locator().len() as u64);
                (Length(PASSTHROUGH_LEN), len, Vec::new())
            }
            Value::BulkData(bulk) => {
                let len = even(u64::from(bulk.length()));
                (Length(to_u32(tag, len)?), len, Vec::new())
            }
            Value::Sequence(sequence) => {
                let items = sequence
                    .items()
                    .iter()
                    .map(|item| self.measure_item(item))
                    .collect::<Result<Vec<_>>>()?;
                let delimiter = match self.options.item_length {
                    LengthEncoding::Defined => 0,
                    LengthEncoding::Undefined => 8,
                };
                let len: u64 = items.iter().map(|item| 8 + item.len + delimiter).sum();
                match self.options.sequence_length {
                    LengthEncoding::Defined => (Length(to_u32(tag, len)?), len, items),
                    LengthEncoding::Undefined => (Length::UNDEFINED, len + 8, items),
                }
            }
            Value::Fragments(fragments) => {
                let len: u64 = fragments
                    .fragments()
                    .iter()
                    .map(|fragment| 8 + even(fragment.len()))
                    .sum();
                (Length::UNDEFINED, len + 8, Vec::new())
            }
        };
        Ok(Measure { len, total, items })
    }
}

/// The value representation under which a value is written.
fn value_vr(attr: &Attribute) -> VR {
    match attr.value() {
        Value::Sequence(_) => VR::SQ,
        _ => attr.vr(),
    }
}

fn to_u32(tag: Tag, len: u64) -> Result<u32> {
    ensure!(len < u64::from(u32::MAX), ValueTooLongSnafu { tag, len });
    Ok(len as u32)
}

#[cfg(test)]
mod tests {
    use super::{AttributeWriter, LengthEncoding, WriteOptions};
    use crate::dataset::read::{AttributeReader, ReadOptions};
    use dcmio_core::{Attribute, BulkData, Fragments, ItemSet, Tag, Value, VR};
    use dcmio_dictionary_std::{tags, StandardDataDictionary};
    use dcmio_transfer_syntax_registry::entries;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn write(set: &ItemSet, options: WriteOptions) -> Vec<u8> {
        let mut out = Vec::new();
        let mut writer =
            AttributeWriter::new(&mut out, &entries::EXPLICIT_VR_LITTLE_ENDIAN, options).unwrap();
        writer.write_dataset(set).unwrap();
        writer.finish().unwrap();
        out
    }

    fn nested() -> ItemSet {
        let mut first = ItemSet::new();
        first.put_str(tags::REFERENCED_SOP_CLASS_UID, VR::UI, "1.2");
        let mut second = ItemSet::new();
        second.put_str(tags::REFERENCED_SOP_CLASS_UID, VR::UI, "1.3");
        let mut set = ItemSet::new();
        set.put_sequence(tags::REFERENCED_IMAGE_SEQUENCE, vec![first, second]);
        set.put_str(tags::PATIENT_NAME, VR::PN, "Doe");
        set
    }

    #[test]
    fn write_defined_lengths() {
        let out = write(&nested(), WriteOptions::new().defined_lengths());
        #[rustfmt::skip]
        let expected: &[u8] = &[
            // (0008,1140) SQ, len 40
            0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x28, 0x00, 0x00, 0x00,
            // item, len 12
            0xFE, 0xFF, 0x00, 0xE0, 0x0C, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
            b'1', b'.', b'2', 0x00,
            // item, len 12
            0xFE, 0xFF, 0x00, 0xE0, 0x0C, 0x00, 0x00, 0x00,
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
            b'1', b'.', b'3', 0x00,
            // (0010,0010) PN, len 4
            0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
            b'D', b'o', b'e', b' ',
        ];
        assert_eq!(&out[..], expected);
    }

    #[test]
    fn undefined_lengths_read_back_the_same() {
        let set = nested();
        let dict = StandardDataDictionary::new();
        for options in [
            WriteOptions::new(),
            WriteOptions::new().defined_lengths(),
            WriteOptions::new().item_length(LengthEncoding::Defined),
            WriteOptions::new().sequence_length(LengthEncoding::Defined),
        ] {
            let out = write(&set, options);
            let mut reader = AttributeReader::new(
                &out[..],
                &entries::EXPLICIT_VR_LITTLE_ENDIAN,
                &dict,
                ReadOptions::default(),
            )
            .unwrap();
            let read = reader.read_dataset(|_| false).unwrap();
            let items = read.items(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
            assert_eq!(items.len(), 2, "{:?}", options);
            assert_eq!(items[0].string(tags::REFERENCED_SOP_CLASS_UID).as_deref(), Some("1.2"));
            assert_eq!(items[1].string(tags::REFERENCED_SOP_CLASS_UID).as_deref(), Some("1.3"));
            assert_eq!(read.string(tags::PATIENT_NAME).as_deref(), Some("Doe"));
        }
    }

    #[test]
    fn long_short_form_values_become_un() {
        let mut set = ItemSet::new();
        set.put(Attribute::new(Tag(0x0010, 0x1000), VR::LO, vec![b'A'; 0x10000]));
        let out = write(&set, WriteOptions::new());
        assert_eq!(out.len(), 12 + 0x10000);
        #[rustfmt::skip]
        assert_eq!(&out[..12], &[
            0x10, 0x00, 0x00, 0x10, b'U', b'N', 0x00, 0x00, 0x00, 0x00, 0x01, 0x00,
        ]);
    }

    #[test]
    fn convert_to_big_endian() {
        let mut set = ItemSet::new();
        set.put_ints(tags::ROWS, VR::US, &[512]);
        let mut out = Vec::new();
        let mut writer = AttributeWriter::new(
            &mut out,
            &entries::EXPLICIT_VR_BIG_ENDIAN,
            WriteOptions::new(),
        )
        .unwrap();
        writer.write_dataset(&set).unwrap();
        assert_eq!(writer.bytes_written(), 10);
        writer.finish().unwrap();
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0x00, 0x28, 0x00, 0x10, b'U', b'S', 0x00, 0x02,
            0x02, 0x00,
        ]);
    }

    #[test]
    fn deep_sequences_declare_their_lengths() {
        let mut set = ItemSet::new();
        set.put_str(tags::REFERENCED_SOP_CLASS_UID, VR::UI, "1.2.6");
        for depth in (0..6).rev() {
            let mut item = ItemSet::new();
            item.put_str(tags::REFERENCED_SOP_CLASS_UID, VR::UI, &format!("1.2.{}", depth));
            item.put_sequence(tags::REFERENCED_IMAGE_SEQUENCE, vec![set]);
            set = item;
        }

        let mut out = Vec::new();
        let mut writer = AttributeWriter::new(
            &mut out,
            &entries::EXPLICIT_VR_BIG_ENDIAN,
            WriteOptions::new().defined_lengths(),
        )
        .unwrap();
        let len = writer.encoded_len(&set).unwrap();
        writer.write_dataset(&set).unwrap();
        writer.finish().unwrap();
        assert_eq!(out.len() as u64, len);

        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            &out[..],
            &entries::EXPLICIT_VR_BIG_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .unwrap();
        let mut item = reader.read_dataset(|_| false).unwrap();
        for depth in 0..6 {
            assert_eq!(
                item.string(tags::REFERENCED_SOP_CLASS_UID),
                Some(format!("1.2.{}", depth))
            );
            item = item.items(tags::REFERENCED_IMAGE_SEQUENCE).unwrap()[0].clone();
        }
        assert_eq!(item.string(tags::REFERENCED_SOP_CLASS_UID).as_deref(), Some("1.2.6"));
    }

    #[test]
    fn copy_bulk_data_inline() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0xAA, 0x01, 0x00, 0x02, 0x00, 0xBB]).unwrap();
        file.flush().unwrap();
        // two big endian words at offset 1
        let bulk = BulkData::from_file(file.path(), 1, 4, true).unwrap();
        let mut set = ItemSet::new();
        set.put_bulk_data(tags::PIXEL_DATA, VR::OW, bulk);

        let out = write(&set, WriteOptions::new());
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0xE0, 0x7F, 0x10, 0x00, b'O', b'W', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
            // swapped to little endian
            0x00, 0x01, 0x00, 0x02,
        ]);
    }

    #[test]
    fn passthrough_round_trip() {
        let bulk = BulkData::new("file:///blk", 0, 6, false);
        let mut set = ItemSet::new();
        set.put_bulk_data(tags::PIXEL_DATA, VR::OB, bulk.clone());
        set.put_str(tags::PATIENT_NAME, VR::PN, "Doe");

        let out = write(&set, WriteOptions::new().bulk_data_passthrough(true));
        assert_eq!(&out[8..12], &[0xFB, 0xFB, 0x00, 0x00]);

        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            &out[..],
            &entries::EXPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default().bulk_data_passthrough(true),
        )
        .unwrap();
        let read = reader.read_dataset(|_| false).unwrap();
        assert_eq!(read.value(tags::PIXEL_DATA), Some(&Value::BulkData(bulk)));
        assert_eq!(read.string(tags::PATIENT_NAME).as_deref(), Some("Doe"));
    }

    #[test]
    fn fragments_use_undefined_length() {
        let mut set = ItemSet::new();
        set.put_fragments(
            tags::PIXEL_DATA,
            VR::OB,
            Fragments::from(vec![Vec::new(), vec![1u8, 2, 3]]),
        );
        let out = write(&set, WriteOptions::new().defined_lengths());
        #[rustfmt::skip]
        assert_eq!(&out[..], &[
            0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFE, 0xFF, 0x00, 0xE0, 0x00, 0x00, 0x00, 0x00,
            // odd fragments are padded
            0xFE, 0xFF, 0x00, 0xE0, 0x04, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x00,
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ]);
    }
}

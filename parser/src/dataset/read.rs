//! The attribute stream reader.
//!
//! An [`AttributeReader`] decodes a stream of attributes
//! into an [`ItemSet`], descending into sequences and fragments,
//! resolving value representations left unknown by the stream,
//! and handing the values selected by the bulk data policy
//! to a [`BulkDataCreator`].
//!
//! The way values are stored is up to a [`ValueConsumer`]:
//! [`read_dataset`](AttributeReader::read_dataset) builds the attribute tree,
//! whereas other consumers can call back into the reader
//! to read, skip or inspect each value.
//!
//! ```
//! # use dcmio_core::{Tag, VR};
//! # use dcmio_dictionary_std::StandardDataDictionary;
//! # use dcmio_parser::dataset::read::{AttributeReader, ReadOptions};
//! # use dcmio_transfer_syntax_registry::entries::EXPLICIT_VR_LITTLE_ENDIAN;
//! #[rustfmt::skip]
//! let bytes: &[u8] = &[
//!     // (0028,0010) US, len 2
//!     0x28, 0x00, 0x10, 0x00, b'U', b'S', 0x02, 0x00,
//!     0x05, 0x00,
//! ];
//! let dict = StandardDataDictionary::new();
//! let mut reader = AttributeReader::new(
//!     bytes,
//!     &EXPLICIT_VR_LITTLE_ENDIAN,
//!     &dict,
//!     ReadOptions::default(),
//! )?;
//! let dataset = reader.read_dataset(|_| false)?;
//! assert_eq!(dataset.int(Tag(0x0028, 0x0010)), Some(5));
//! # Ok::<_, dcmio_parser::dataset::read::Error>(())
//! ```

use crate::bulk::creator::Error as CreatorError;
use crate::bulk::{BulkDataCreator, BulkDataRules};
use crate::dataset::consumer::{TreeBuilder, ValueConsumer};
use crate::stateful::decode::{Error as DecoderError, StatefulDecoder};
use dcmio_core::dictionary::{DataDictionary, DataDictionaryEntry, VirtualVr};
use dcmio_core::header::{DataElementHeader, HasLength, Length, SequenceItemHeader};
use dcmio_core::value::LocatorError;
use dcmio_core::{BulkData, Fragment, Fragments, ItemPointer, ItemSet, Sequence, Tag, Value, VR};
use dcmio_dictionary_std::tags;
use dcmio_encoding::transfer_syntax::TransferSyntax;
use smallvec::SmallVec;
use snafu::{Backtrace, OptionExt, ResultExt, Snafu};
use std::fmt;
use std::io::Read;
use std::sync::Arc;
use tracing::{trace, warn};

/// The magic value length announcing a passthrough bulk data reference.
pub const PASSTHROUGH_LEN: u32 = 0xFBFB;

#[derive(Debug, Snafu)]
#[non_exhaustive]
pub enum Error {
    #[snafu(display("Could not create decoder"))]
    CreateDecoder {
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not read attribute header"))]
    ReadHeader {
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not read item header in {}", tag))]
    ReadItemHeader {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display("Could not read value of {}", tag))]
    ReadValue {
        tag: Tag,
        #[snafu(backtrace)]
        source: DecoderError,
    },
    #[snafu(display(
        "Value of {} at position {} is {} bytes long, more than the allowed {}",
        tag,
        position,
        len,
        max
    ))]
    ValueTooLong {
        tag: Tag,
        position: u64,
        len: u32,
        max: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Value of {} at position {} is {} bytes long, but only {} bytes remain",
        tag,
        position,
        len,
        remaining
    ))]
    ValueBeyondEnd {
        tag: Tag,
        position: u64,
        len: u32,
        remaining: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Sequence {} at position {} declares {} bytes but its items span {}",
        tag,
        position,
        declared,
        read
    ))]
    SequenceLengthMismatch {
        tag: Tag,
        position: u64,
        declared: u32,
        read: u64,
        backtrace: Backtrace,
    },
    #[snafu(display(
        "Item of {} at position {} declares {} bytes but its attributes span {}",
        tag,
        position,
        declared,
        read
    ))]
    ItemLengthMismatch {
        tag: Tag,
        position: u64,
        declared: u32,
        read: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Nesting of {} at position {} exceeds depth {}", tag, position, max_depth))]
    DepthExceeded {
        tag: Tag,
        position: u64,
        max_depth: usize,
        backtrace: Backtrace,
    },
    #[snafu(display("Item of undefined length found at position {}", position))]
    UnexpectedItem { position: u64, backtrace: Backtrace },
    #[snafu(display("Fragment of {} at position {} has undefined length", tag, position))]
    UndefinedFragmentLength {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Value of {} at position {} has undefined length", tag, position))]
    UndefinedValueLength {
        tag: Tag,
        position: u64,
        backtrace: Backtrace,
    },
    #[snafu(display("Could not create bulk data of {} at position {}", tag, position))]
    CreateBulkData {
        tag: Tag,
        position: u64,
        #[snafu(backtrace)]
        source: CreatorError,
    },
    #[snafu(display("Passthrough locator of {} at position {} is not text", tag, position))]
    PassthroughText {
        tag: Tag,
        position: u64,
        source: std::string::FromUtf8Error,
        backtrace: Backtrace,
    },
    #[snafu(display("Invalid passthrough locator of {} at position {}", tag, position))]
    PassthroughLocator {
        tag: Tag,
        position: u64,
        #[snafu(backtrace)]
        source: LocatorError,
    },
    #[snafu(display("Could not write dump"))]
    #[snafu(visibility(pub(crate)))]
    WriteDump {
        source: std::io::Error,
        backtrace: Backtrace,
    },
    #[snafu(display("No {} to read at this point", what))]
    NothingToRead {
        what: &'static str,
        backtrace: Backtrace,
    },
}

/// The classification of a read error.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The stream does not follow the encoding rules
    /// or ends too soon.
    MalformedStream,
    /// A declared length is inconsistent with the stream
    /// or exceeds the configured limits.
    LengthViolation,
    /// Reading from the source or writing to auxiliary storage failed.
    Resource,
    /// A value consumer called the reader out of order.
    Usage,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::MalformedStream => "malformed stream",
            ErrorKind::LengthViolation => "length violation",
            ErrorKind::Resource => "resource error",
            ErrorKind::Usage => "usage error",
        })
    }
}

fn decoder_error_kind(e: &DecoderError) -> ErrorKind {
    match e {
        _ if e.is_eof() => ErrorKind::MalformedStream,
        DecoderError::DecodeHeader { .. }
        | DecoderError::DecodeItemHeader { .. }
        | DecoderError::UnsupportedTransferSyntax { .. } => ErrorKind::MalformedStream,
        _ => ErrorKind::Resource,
    }
}

impl Error {
    /// The kind of error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CreateDecoder { source }
            | Error::ReadHeader { source }
            | Error::ReadItemHeader { source, .. }
            | Error::ReadValue { source, .. } => decoder_error_kind(source),
            Error::ValueTooLong { .. }
            | Error::ValueBeyondEnd { .. }
            | Error::SequenceLengthMismatch { .. }
            | Error::ItemLengthMismatch { .. } => ErrorKind::LengthViolation,
            Error::CreateBulkData { source, .. } if source.is_truncated_value() => {
                ErrorKind::MalformedStream
            }
            Error::CreateBulkData { .. } | Error::WriteDump { .. } => ErrorKind::Resource,
            Error::NothingToRead { .. } => ErrorKind::Usage,
            Error::DepthExceeded { .. }
            | Error::UnexpectedItem { .. }
            | Error::UndefinedFragmentLength { .. }
            | Error::UndefinedValueLength { .. }
            | Error::PassthroughText { .. }
            | Error::PassthroughLocator { .. } => ErrorKind::MalformedStream,
        }
    }

    /// The tag of the offending attribute, when known.
    pub fn tag(&self) -> Option<Tag> {
        match self {
            Error::ReadItemHeader { tag, .. }
            | Error::ReadValue { tag, .. }
            | Error::ValueTooLong { tag, .. }
            | Error::ValueBeyondEnd { tag, .. }
            | Error::SequenceLengthMismatch { tag, .. }
            | Error::ItemLengthMismatch { tag, .. }
            | Error::DepthExceeded { tag, .. }
            | Error::UndefinedFragmentLength { tag, .. }
            | Error::UndefinedValueLength { tag, .. }
            | Error::CreateBulkData { tag, .. }
            | Error::PassthroughText { tag, .. }
            | Error::PassthroughLocator { tag, .. } => Some(*tag),
            _ => None,
        }
    }

    /// The position in the stream where the error was found, when known.
    pub fn position(&self) -> Option<u64> {
        match self {
            Error::CreateDecoder { source }
            | Error::ReadHeader { source }
            | Error::ReadItemHeader { source, .. }
            | Error::ReadValue { source, .. } => source.position(),
            Error::ValueTooLong { position, .. }
            | Error::ValueBeyondEnd { position, .. }
            | Error::SequenceLengthMismatch { position, .. }
            | Error::ItemLengthMismatch { position, .. }
            | Error::DepthExceeded { position, .. }
            | Error::UnexpectedItem { position, .. }
            | Error::UndefinedFragmentLength { position, .. }
            | Error::UndefinedValueLength { position, .. }
            | Error::CreateBulkData { position, .. }
            | Error::PassthroughText { position, .. }
            | Error::PassthroughLocator { position, .. } => Some(*position),
            Error::WriteDump { .. } | Error::NothingToRead { .. } => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Options for reading attribute streams.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ReadOptions {
    /// The maximum length of a single value, unlimited if `None`.
    pub max_value_len: Option<u64>,
    /// The maximum nesting depth of sequences.
    pub max_depth: usize,
    /// How many bytes a sequence of defined length
    /// may overrun its declared length
    /// and still be recovered as an opaque value.
    pub overrun_slack: u32,
    /// The maximum number of bytes kept for rewinding a sequence.
    pub recording_limit: usize,
    /// The total length of the source stream, if known,
    /// measured in the same positions as the reader.
    pub stream_len: Option<u64>,
    /// Whether to read passthrough bulk data references.
    pub bulk_data_passthrough: bool,
    /// The bulk data policy,
    /// which only applies when a bulk data creator is given.
    pub bulk_data_rules: Arc<BulkDataRules>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        ReadOptions {
            max_value_len: None,
            max_depth: 64,
            overrun_slack: 8,
            recording_limit: 1 << 20,
            stream_len: None,
            bulk_data_passthrough: false,
            bulk_data_rules: Arc::new(BulkDataRules::default()),
        }
    }
}

impl ReadOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse values longer than `len` bytes.
    pub fn max_value_len(mut self, len: u64) -> Self {
        self.max_value_len = Some(len);
        self
    }

    /// Set the maximum nesting depth of sequences.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set how many bytes a sequence may overrun its declared length
    /// and still be recovered.
    pub fn overrun_slack(mut self, slack: u32) -> Self {
        self.overrun_slack = slack;
        self
    }

    /// Set the maximum number of bytes kept for rewinding a sequence.
    pub fn recording_limit(mut self, limit: usize) -> Self {
        self.recording_limit = limit;
        self
    }

    /// Declare the total length of the source stream,
    /// so that values reaching past it are refused up front.
    pub fn stream_len(mut self, len: u64) -> Self {
        self.stream_len = Some(len);
        self
    }

    /// Set whether passthrough bulk data references are recognized.
    pub fn bulk_data_passthrough(mut self, passthrough: bool) -> Self {
        self.bulk_data_passthrough = passthrough;
        self
    }

    /// Set the bulk data policy.
    pub fn bulk_data_rules(mut self, rules: impl Into<Arc<BulkDataRules>>) -> Self {
        self.bulk_data_rules = rules.into();
        self
    }
}

/// The header of the attribute being read,
/// with its value representation resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeHeader {
    /// the header, with the resolved value representation
    pub header: DataElementHeader,
    /// the private creator of a private attribute
    pub private_creator: Option<String>,
    /// the position of the value in the stream
    pub position: u64,
    /// whether the value is a sequence in implicit VR little endian
    pub implicit_sequence: bool,
}

impl AttributeHeader {
    /// The attribute's tag.
    pub fn tag(&self) -> Tag {
        self.header.tag
    }

    /// The attribute's value representation.
    pub fn vr(&self) -> VR {
        self.header.vr
    }

    /// The declared value length.
    pub fn len(&self) -> Length {
        self.header.len
    }

    /// Whether the value is read as a sequence of items.
    pub fn is_sequence(&self) -> bool {
        self.header.vr == VR::SQ || self.implicit_sequence
    }
}

/// An item or fragment whose header was read
/// and whose content is next in the stream.
#[derive(Debug, Copy, Clone)]
struct PendingItem {
    tag: Tag,
    len: Length,
    position: u64,
    /// whether an overrun can be recovered by the enclosing sequence
    recoverable: bool,
}

/// A reader of attribute streams.
///
/// `D` is the data dictionary
/// used to resolve value representations.
pub struct AttributeReader<'s, D> {
    decoder: StatefulDecoder<'s, D>,
    options: ReadOptions,
    creator: Option<&'s mut dyn BulkDataCreator>,
    item_pointers: SmallVec<[ItemPointer; 4]>,
    depth: usize,
    implicit_le: usize,
    current: Option<AttributeHeader>,
    pending_item: Option<PendingItem>,
    pending_fragment: Option<PendingItem>,
}

impl<D> fmt::Debug for AttributeReader<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("AttributeReader")
            .field("decoder", &self.decoder)
            .field("options", &self.options)
            .field("creator", &self.creator)
            .field("item_pointers", &self.item_pointers)
            .field("current", &self.current)
            .finish()
    }
}

impl<'s, D> AttributeReader<'s, D>
where
    D: DataDictionary + Clone + 's,
{
    /// Create a reader over `source` in the given transfer syntax.
    pub fn new<S>(source: S, ts: &TransferSyntax, dict: D, options: ReadOptions) -> Result<Self>
    where
        S: Read + 's,
    {
        Self::with_position(source, ts, dict, options, 0)
    }

    /// Create a reader over `source`,
    /// which starts at the given position of the stream.
    pub fn with_position<S>(
        source: S,
        ts: &TransferSyntax,
        dict: D,
        options: ReadOptions,
        position: u64,
    ) -> Result<Self>
    where
        S: Read + 's,
    {
        let decoder =
            StatefulDecoder::with_position(source, ts, dict, options.recording_limit, position)
                .context(CreateDecoderSnafu)?;
        Ok(AttributeReader {
            decoder,
            options,
            creator: None,
            item_pointers: SmallVec::new(),
            depth: 0,
            implicit_le: 0,
            current: None,
            pending_item: None,
            pending_fragment: None,
        })
    }

    /// Continue reading the rest of the stream in another transfer syntax.
    pub fn switch_transfer_syntax(&mut self, ts: &TransferSyntax) -> Result<()> {
        self.decoder
            .switch_transfer_syntax(ts)
            .context(CreateDecoderSnafu)
    }
}

impl<'s, D> AttributeReader<'s, D>
where
    D: DataDictionary,
{
    /// Externalize the values selected by the bulk data policy
    /// through the given creator.
    pub fn with_bulk_data_creator(mut self, creator: &'s mut dyn BulkDataCreator) -> Self {
        self.creator = Some(creator);
        self
    }

    /// The reading options.
    pub fn options(&self) -> &ReadOptions {
        &self.options
    }

    /// The current position in the stream.
    pub fn position(&self) -> u64 {
        self.decoder.position()
    }

    /// The current transfer syntax.
    pub fn transfer_syntax(&self) -> &TransferSyntax {
        self.decoder.transfer_syntax()
    }

    /// The header of the attribute being read,
    /// or of the attribute which stopped
    /// [`read_dataset`](AttributeReader::read_dataset).
    pub fn current(&self) -> Option<&AttributeHeader> {
        self.current.as_ref()
    }

    /// The path of sequences and items down to the current item.
    pub fn item_pointers(&self) -> &[ItemPointer] {
        &self.item_pointers
    }

    /// Whether the values being read are big endian.
    pub fn is_big_endian(&self) -> bool {
        self.implicit_le == 0 && self.decoder.is_big_endian()
    }

    /// Look at the next bytes of the stream without consuming them.
    pub fn peek_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        self.decoder.peek(n).context(ReadHeaderSnafu)
    }

    /// The dictionary alias of the given attribute, if known.
    pub fn dictionary_alias(&self, header: &AttributeHeader) -> Option<String> {
        let dict = self.decoder.dict();
        let entry = match &header.private_creator {
            Some(creator) => dict.by_private_tag(creator, header.tag())?,
            None => dict.by_tag(header.tag())?,
        };
        Some(entry.alias().to_string())
    }

    /// Read the whole data set into an item set,
    /// stopping at the end of the stream
    /// or before the first top level attribute
    /// for which `until` returns true.
    pub fn read_dataset<F>(&mut self, until: F) -> Result<ItemSet>
    where
        F: FnMut(&DataElementHeader) -> bool,
    {
        self.read_dataset_with(&mut TreeBuilder, until)
    }

    /// Read the data set, handing each value to the given consumer.
    ///
    /// The attribute which stops the reading is consumed
    /// and remains available through [`current`](AttributeReader::current).
    pub fn read_dataset_with<C, F>(&mut self, consumer: &mut C, mut until: F) -> Result<ItemSet>
    where
        C: ValueConsumer,
        F: FnMut(&DataElementHeader) -> bool,
    {
        let mut set = ItemSet::with_byte_order(self.is_big_endian());
        consumer.start_dataset(self)?;
        while let Some(header) = self.read_header()? {
            if until(&header) {
                let position = self.decoder.position();
                self.current = Some(self.resolve_header(header, &set, position));
                break;
            }
            if header.tag.group() == 0xFFFE {
                self.skip_stray(header)?;
                continue;
            }
            self.read_attribute(consumer, &mut set, header)?;
        }
        consumer.end_dataset(self)?;
        Ok(set)
    }

    /// Read the attributes of the file meta group,
    /// which must be next in the stream.
    pub fn read_file_meta_group(&mut self) -> Result<ItemSet> {
        let mut set = ItemSet::new();
        loop {
            let next = self.decoder.peek(2).context(ReadHeaderSnafu)?;
            if next.len() < 2 || u16::from_le_bytes([next[0], next[1]]) != 0x0002 {
                break;
            }
            let header = self
                .decoder
                .decode_header(false)
                .context(ReadHeaderSnafu)?;
            self.read_attribute(&mut TreeBuilder, &mut set, header)?;
        }
        Ok(set)
    }

    /// Decode the next attribute header,
    /// or `None` at the end of the stream.
    pub fn read_header(&mut self) -> Result<Option<DataElementHeader>> {
        if self.decoder.at_end().context(ReadHeaderSnafu)? {
            return Ok(None);
        }
        self.decoder
            .decode_header(self.implicit_le > 0)
            .context(ReadHeaderSnafu)
            .map(Some)
    }

    /// Read the value of the current attribute,
    /// whatever its kind.
    pub fn read_attribute_value<C>(&mut self, consumer: &mut C) -> Result<Value>
    where
        C: ValueConsumer,
    {
        let current = self.require_current()?;
        if current.len() == Length(0) {
            return Ok(Value::Empty);
        }
        if current.is_sequence() {
            self.read_sequence(consumer)
        } else if current.len().is_undefined() {
            self.read_fragments(consumer).map(Value::from)
        } else {
            self.read_value()
        }
    }

    /// Read the primitive value of the current attribute,
    /// which must have a defined length.
    ///
    /// The value is externalized if the bulk data policy selects it.
    pub fn read_value(&mut self) -> Result<Value> {
        let current = self.require_current()?;
        let tag = current.tag();
        let vr = current.vr();
        let private_creator = current.private_creator.clone();
        let len = current
            .len()
            .get()
            .context(UndefinedValueLengthSnafu {
                tag,
                position: current.position,
            })?;
        if len == 0 {
            return Ok(Value::Empty);
        }
        if self.options.bulk_data_passthrough && len == PASSTHROUGH_LEN {
            return self.read_passthrough(tag).map(Value::BulkData);
        }
        self.check_value_len(tag, len)?;
        if let Some(bulk) = self.create_bulk_data(tag, vr, private_creator.as_deref(), len)? {
            return Ok(Value::BulkData(bulk));
        }
        let bytes = self
            .decoder
            .read_bytes(tag, len)
            .context(ReadValueSnafu { tag })?;
        Ok(Value::from(bytes))
    }

    /// Skip over the value of the current attribute,
    /// which must have a defined length.
    pub fn skip_value(&mut self) -> Result<()> {
        let current = self.require_current()?;
        let tag = current.tag();
        let len = current
            .len()
            .get()
            .context(UndefinedValueLengthSnafu {
                tag,
                position: current.position,
            })?;
        if self.options.bulk_data_passthrough && len == PASSTHROUGH_LEN {
            return self.read_passthrough(tag).map(drop);
        }
        self.check_value_len(tag, len)?;
        self.decoder
            .skip_bytes(tag, len)
            .context(ReadValueSnafu { tag })
    }

    /// Read the items of the current sequence attribute,
    /// calling the consumer once per item.
    ///
    /// A sequence of defined length which overruns its declared length
    /// by no more than the configured slack
    /// is returned as an opaque value of the declared length,
    /// and the current attribute is retagged as `UN`.
    pub fn read_sequence<C>(&mut self, consumer: &mut C) -> Result<Value>
    where
        C: ValueConsumer,
    {
        let mut current = self.require_current()?.clone();
        let tag = current.tag();
        let start = self.decoder.position();
        if self.depth >= self.options.max_depth {
            return DepthExceededSnafu {
                tag,
                position: start,
                max_depth: self.options.max_depth,
            }
            .fail();
        }
        self.depth += 1;
        if current.implicit_sequence {
            self.implicit_le += 1;
        }
        let mark = current.len().get().map(|_| self.decoder.mark());
        let items = self.read_items(consumer, &current);
        if current.implicit_sequence {
            self.implicit_le -= 1;
        }
        self.depth -= 1;
        let recorded = mark.and_then(|mark| self.decoder.release(mark));
        let items = items?;

        let value = match current.len().get() {
            None => Value::from(items),
            Some(declared) => {
                let read = self.decoder.position() - start;
                if read == u64::from(declared) {
                    Value::from(items)
                } else {
                    let overrun = read.saturating_sub(u64::from(declared));
                    match recorded {
                        Some(mut bytes)
                            if read > u64::from(declared)
                                && overrun <= u64::from(self.options.overrun_slack) =>
                        {
                            warn!(
                                "Sequence {} at position {} overruns its length {} by {} bytes, keeping it as an opaque value",
                                tag, start, declared, overrun
                            );
                            let rest = bytes.split_off(declared as usize);
                            self.decoder.unread(&rest);
                            current.header.vr = VR::UN;
                            current.implicit_sequence = false;
                            Value::from(bytes)
                        }
                        _ => {
                            return SequenceLengthMismatchSnafu {
                                tag,
                                position: start,
                                declared,
                                read,
                            }
                            .fail();
                        }
                    }
                }
            }
        };
        self.current = Some(current);
        Ok(value)
    }

    fn read_items<C>(&mut self, consumer: &mut C, current: &AttributeHeader) -> Result<Sequence>
    where
        C: ValueConsumer,
    {
        let tag = current.tag();
        let declared = current.len().get();
        let start = self.decoder.position();
        let mut sequence = Sequence::with_length(current.len());
        let mut index = 0;
        loop {
            match declared {
                Some(len) if self.decoder.position() - start >= u64::from(len) => break,
                None if self.decoder.at_end().context(ReadItemHeaderSnafu { tag })? => {
                    trace!("End of input in sequence {} of undefined length", tag);
                    break;
                }
                _ => {}
            }
            let position = self.decoder.position();
            let header = self
                .decoder
                .decode_item_header(self.implicit_le > 0)
                .context(ReadItemHeaderSnafu { tag })?;
            match header {
                SequenceItemHeader::Item { len } => {
                    self.item_pointers.push(ItemPointer {
                        sequence_tag: tag,
                        private_creator: current.private_creator.clone(),
                        item_index: index,
                    });
                    self.pending_item = Some(PendingItem {
                        tag,
                        len,
                        position: position + 8,
                        recoverable: declared.is_some(),
                    });
                    let result = consumer.read_sequence_value(self, &mut sequence);
                    self.item_pointers.pop();
                    self.pending_item = None;
                    result?;
                    index += 1;
                }
                SequenceItemHeader::SequenceDelimiter => {
                    if declared.is_some() {
                        warn!(
                            "Sequence delimiter in {} of defined length at position {}",
                            tag, position
                        );
                    }
                    break;
                }
                SequenceItemHeader::ItemDelimiter => {
                    warn!("Stray item delimiter in {} at position {}", tag, position);
                }
            }
        }
        Ok(sequence)
    }

    /// Read the item whose header was just read by
    /// [`read_sequence`](AttributeReader::read_sequence).
    pub fn read_item<C>(&mut self, consumer: &mut C) -> Result<ItemSet>
    where
        C: ValueConsumer,
    {
        let item = self
            .pending_item
            .take()
            .context(NothingToReadSnafu { what: "item" })?;
        let outer = self.current.clone();
        let mut set = ItemSet::with_length(self.is_big_endian(), item.len);
        let declared = item.len.get();
        loop {
            match declared {
                Some(len) if self.decoder.position() - item.position >= u64::from(len) => break,
                _ => {}
            }
            let header = match self.read_header()? {
                Some(header) => header,
                None => {
                    trace!("End of input in item of {}", item.tag);
                    break;
                }
            };
            match header.tag {
                Tag::ITEM_DELIMITER if declared.is_none() => break,
                Tag::SEQUENCE_DELIMITER if declared.is_none() => {
                    warn!(
                        "Missing item delimiter in {} before position {}",
                        item.tag,
                        self.decoder.position()
                    );
                    self.decoder.unread(&self.sequence_delimiter_bytes());
                    break;
                }
                _ if header.tag.group() == 0xFFFE => self.skip_stray(header)?,
                _ => self.read_attribute(consumer, &mut set, header)?,
            }
        }
        if let Some(declared) = declared {
            let read = self.decoder.position() - item.position;
            if read > u64::from(declared) && item.recoverable {
                // left to the enclosing sequence length check
                warn!(
                    "Item in {} at position {} overruns its length {} by {} bytes",
                    item.tag,
                    item.position,
                    declared,
                    read - u64::from(declared)
                );
            } else if read != u64::from(declared) {
                return ItemLengthMismatchSnafu {
                    tag: item.tag,
                    position: item.position,
                    declared,
                    read,
                }
                .fail();
            }
        }
        self.current = outer;
        Ok(set)
    }

    /// Read the fragments of the current attribute of undefined length,
    /// calling the consumer once per fragment.
    pub fn read_fragments<C>(&mut self, consumer: &mut C) -> Result<Fragments>
    where
        C: ValueConsumer,
    {
        let current = self.require_current()?.clone();
        let tag = current.tag();
        let mut fragments = Fragments::new();
        loop {
            if self.decoder.at_end().context(ReadItemHeaderSnafu { tag })? {
                trace!("End of input in fragments of {}", tag);
                break;
            }
            let position = self.decoder.position();
            let header = self
                .decoder
                .decode_item_header(self.implicit_le > 0)
                .context(ReadItemHeaderSnafu { tag })?;
            match header {
                SequenceItemHeader::Item { len } => {
                    if len.is_undefined() {
                        return UndefinedFragmentLengthSnafu { tag, position }.fail();
                    }
                    self.pending_fragment = Some(PendingItem {
                        tag,
                        len,
                        position: position + 8,
                        recoverable: false,
                    });
                    let result = consumer.read_fragment_value(self, &mut fragments);
                    self.pending_fragment = None;
                    result?;
                }
                SequenceItemHeader::SequenceDelimiter => break,
                SequenceItemHeader::ItemDelimiter => {
                    warn!("Stray item delimiter in {} at position {}", tag, position);
                }
            }
        }
        self.current = Some(current);
        Ok(fragments)
    }

    /// Read the fragment whose header was just read by
    /// [`read_fragments`](AttributeReader::read_fragments).
    ///
    /// The fragment is externalized if the bulk data policy
    /// selects the attribute.
    pub fn read_fragment(&mut self) -> Result<Fragment> {
        let fragment = self
            .pending_fragment
            .take()
            .context(NothingToReadSnafu { what: "fragment" })?;
        let tag = fragment.tag;
        let len = fragment.len.0;
        self.check_value_len(tag, len)?;
        let (vr, private_creator) = match &self.current {
            Some(current) => (current.vr(), current.private_creator.clone()),
            None => (VR::OB, None),
        };
        if len > 0 {
            if let Some(bulk) = self.create_bulk_data(tag, vr, private_creator.as_deref(), len)? {
                return Ok(Fragment::BulkData(bulk));
            }
        }
        self.decoder
            .read_bytes(tag, len)
            .context(ReadValueSnafu { tag })
            .map(Fragment::Bytes)
    }

    /// Skip the fragment whose header was just read,
    /// returning its length.
    pub fn skip_fragment(&mut self) -> Result<u32> {
        let fragment = self
            .pending_fragment
            .take()
            .context(NothingToReadSnafu { what: "fragment" })?;
        let len = fragment.len.0;
        self.check_value_len(fragment.tag, len)?;
        self.decoder
            .skip_bytes(fragment.tag, len)
            .context(ReadValueSnafu { tag: fragment.tag })?;
        Ok(len)
    }

    /// The declared length of the item or fragment about to be read.
    pub fn pending_len(&self) -> Option<Length> {
        self.pending_item
            .or(self.pending_fragment)
            .map(|item| item.len)
    }

    fn read_attribute<C>(
        &mut self,
        consumer: &mut C,
        set: &mut ItemSet,
        header: DataElementHeader,
    ) -> Result<()>
    where
        C: ValueConsumer,
    {
        let position = self.decoder.position();
        self.current = Some(self.resolve_header(header, set, position));
        consumer.read_attribute_value(self, set)
    }

    fn require_current(&self) -> Result<&AttributeHeader> {
        self.current
            .as_ref()
            .context(NothingToReadSnafu { what: "attribute" })
    }

    /// Skip item headers and delimiters found outside of a sequence.
    fn skip_stray(&mut self, header: DataElementHeader) -> Result<()> {
        let position = self.decoder.position();
        warn!("Unexpected {} at position {}, skipping", header.tag, position);
        if header.tag == Tag::ITEM {
            let len = header
                .length()
                .get()
                .context(UnexpectedItemSnafu { position })?;
            self.check_value_len(header.tag, len)?;
            self.decoder
                .skip_bytes(header.tag, len)
                .context(ReadValueSnafu { tag: header.tag })?;
        }
        Ok(())
    }

    fn sequence_delimiter_bytes(&self) -> [u8; 8] {
        if self.is_big_endian() {
            [0xFF, 0xFE, 0xE0, 0xDD, 0, 0, 0, 0]
        } else {
            [0xFE, 0xFF, 0xDD, 0xE0, 0, 0, 0, 0]
        }
    }

    fn check_value_len(&self, tag: Tag, len: u32) -> Result<()> {
        let position = self.decoder.position();
        if let Some(max) = self.options.max_value_len {
            if u64::from(len) > max {
                return ValueTooLongSnafu {
                    tag,
                    position,
                    len,
                    max,
                }
                .fail();
            }
        }
        if let Some(total) = self.options.stream_len {
            if !self.decoder.is_deflated() {
                let remaining = total.saturating_sub(position);
                if u64::from(len) > remaining {
                    return ValueBeyondEndSnafu {
                        tag,
                        position,
                        len,
                        remaining,
                    }
                    .fail();
                }
            }
        }
        Ok(())
    }

    fn create_bulk_data(
        &mut self,
        tag: Tag,
        vr: VR,
        private_creator: Option<&str>,
        len: u32,
    ) -> Result<Option<BulkData>> {
        let big_endian = self.is_big_endian();
        let creator = match self.creator.as_mut() {
            Some(creator) => creator,
            None => return Ok(None),
        };
        if !self
            .options
            .bulk_data_rules
            .is_bulk_data(&self.item_pointers, private_creator, tag, vr, len)
        {
            return Ok(None);
        }
        if creator.refers_to_source() && self.decoder.is_deflated() {
            warn!(
                "Cannot refer to {} in a deflated stream, reading it inline",
                tag
            );
            return Ok(None);
        }
        let position = self.decoder.position();
        let mut value = self.decoder.value_reader(len);
        let bulk = creator
            .create_bulk_data(&mut value, position, len, big_endian)
            .context(CreateBulkDataSnafu { tag, position })?;
        trace!("Value of {} externalized as {}", tag, bulk);
        Ok(Some(bulk))
    }

    fn read_passthrough(&mut self, tag: Tag) -> Result<BulkData> {
        let position = self.decoder.position();
        let flags = self.decoder.read_u16().context(ReadValueSnafu { tag })?;
        let len = self.decoder.read_u32().context(ReadValueSnafu { tag })?;
        self.check_value_len(tag, len)?;
        let locator = self
            .decoder
            .read_bytes(tag, len)
            .context(ReadValueSnafu { tag })?;
        if len % 2 != 0 {
            self.decoder
                .skip_bytes(tag, 1)
                .context(ReadValueSnafu { tag })?;
        }
        let locator =
            String::from_utf8(locator).context(PassthroughTextSnafu { tag, position })?;
        BulkData::parse(&locator, flags & 1 != 0).context(PassthroughLocatorSnafu { tag, position })
    }

    /// Resolve the value representation of an attribute
    /// and whether it is an implicit VR sequence.
    fn resolve_header(
        &self,
        header: DataElementHeader,
        set: &ItemSet,
        position: u64,
    ) -> AttributeHeader {
        let tag = header.tag;
        let private_creator = if tag.is_private() && !tag.is_private_creator() {
            set.private_creator(tag)
        } else {
            None
        };
        let mut vr = header.vr;
        let mut implicit_sequence = false;
        if vr == VR::UN {
            // an explicit UN of undefined length always holds an implicit VR sequence
            let explicit_vr = self.implicit_le == 0 && self.transfer_syntax().is_explicit_vr();
            let resolved = if explicit_vr && header.len.is_undefined() {
                Some(VR::SQ)
            } else {
                self.dictionary_vr(tag, private_creator.as_deref(), set)
            };
            match resolved {
                Some(VR::SQ) => {
                    vr = VR::SQ;
                    implicit_sequence = true;
                }
                Some(resolved) => vr = resolved,
                None if header.len.is_undefined() => {
                    vr = VR::SQ;
                    implicit_sequence = true;
                }
                None => warn!("Unknown value representation of {}, keeping UN", tag),
            }
        }
        AttributeHeader {
            header: DataElementHeader::new(tag, vr, header.len),
            private_creator,
            position,
            implicit_sequence,
        }
    }

    fn dictionary_vr(&self, tag: Tag, private_creator: Option<&str>, set: &ItemSet) -> Option<VR> {
        if tag.is_group_length() {
            return Some(VR::UL);
        }
        if tag.is_private_creator() {
            return Some(VR::LO);
        }
        let dict = self.decoder.dict();
        let vr = if tag.is_private() {
            dict.by_private_tag(private_creator?, tag)?.vr()
        } else {
            dict.by_tag(tag)?.vr()
        };
        let bits_allocated = || set.int(tags::BITS_ALLOCATED);
        Some(match vr {
            VirtualVr::Exact(vr) => vr,
            VirtualVr::Xs => match set.int(tags::PIXEL_REPRESENTATION) {
                Some(1) => VR::SS,
                _ => VR::US,
            },
            VirtualVr::Px => match bits_allocated() {
                Some(bits) if bits <= 8 => VR::OB,
                _ => VR::OW,
            },
            VirtualVr::Ox if self.implicit_le > 0 || !self.transfer_syntax().is_explicit_vr() => {
                VR::OW
            }
            VirtualVr::Ox => match bits_allocated() {
                Some(bits) if bits <= 8 => VR::OB,
                _ => VR::OW,
            },
            VirtualVr::Lt if self.item_pointers.is_empty() => VR::US,
            VirtualVr::Lt => VR::OW,
            other => other.relaxed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeReader, ErrorKind, ReadOptions};
    use crate::bulk::{BulkDataRules, SourceUriCreator};
    use dcmio_core::{Length, Tag, Value, VR};
    use dcmio_dictionary_std::{tags, StandardDataDictionary};
    use dcmio_transfer_syntax_registry::entries;
    use pretty_assertions::assert_eq;

    #[rustfmt::skip]
    const NESTED_UNDEFINED: &[u8] = &[
        // (0008,1140) SQ, undefined length
        0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
        // item, undefined length
        0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
        // (0008,1150) UI, len 4
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
        b'1', b'.', b'2', 0x00,
        // item delimiter
        0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00,
        // item, len 12
        0xFE, 0xFF, 0x00, 0xE0, 0x0C, 0x00, 0x00, 0x00,
        // (0008,1150) UI, len 4
        0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x04, 0x00,
        b'1', b'.', b'3', 0x00,
        // sequence delimiter
        0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        // (0010,0010) PN, len 4
        0x10, 0x00, 0x10, 0x00, b'P', b'N', 0x04, 0x00,
        b'D', b'o', b'e', b' ',
    ];

    fn read(bytes: &[u8], options: ReadOptions) -> super::Result<dcmio_core::ItemSet> {
        let dict = StandardDataDictionary::new();
        let mut reader =
            AttributeReader::new(bytes, &entries::EXPLICIT_VR_LITTLE_ENDIAN, &dict, options)?;
        reader.read_dataset(|_| false)
    }

    #[test]
    fn read_nested_sequence() {
        let set = read(NESTED_UNDEFINED, ReadOptions::default()).unwrap();
        assert_eq!(set.len(), 2);
        let items = set.items(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].string(Tag(0x0008, 0x1150)).as_deref(), Some("1.2"));
        assert_eq!(items[1].string(Tag(0x0008, 0x1150)).as_deref(), Some("1.3"));
        assert_eq!(
            dcmio_core::header::HasLength::length(&items[1]),
            Length(12)
        );
        assert_eq!(set.string(tags::PATIENT_NAME).as_deref(), Some("Doe"));
    }

    #[test]
    fn stop_before_attribute() {
        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            NESTED_UNDEFINED,
            &entries::EXPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .unwrap();
        let set = reader
            .read_dataset(|header| header.tag == tags::PATIENT_NAME)
            .unwrap();
        assert_eq!(set.len(), 1);
        let current = reader.current().unwrap();
        assert_eq!(current.tag(), tags::PATIENT_NAME);
        assert_eq!(current.vr(), VR::PN);
        assert_eq!(reader.position(), NESTED_UNDEFINED.len() as u64 - 4);
    }

    #[test]
    fn end_of_input_closes_undefined_containers() {
        // cut right after the first item's attribute
        let set = read(&NESTED_UNDEFINED[..32], ReadOptions::default()).unwrap();
        let items = set.items(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(items.len(), 1);

        // cut in the middle of a header
        let err = read(&NESTED_UNDEFINED[..36], ReadOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStream);
    }

    #[test]
    fn value_past_the_end() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0010,0020) LO, len 16, but only 4 bytes follow
            0x10, 0x00, 0x20, 0x00, b'L', b'O', 0x10, 0x00,
            b'1', b'2', b'3', b'4',
        ];
        let err = read(bytes, ReadOptions::default().stream_len(bytes.len() as u64)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthViolation);
        assert_eq!(err.tag(), Some(Tag(0x0010, 0x0020)));
        assert_eq!(err.position(), Some(8));

        // without knowing the stream length, the value is truncated
        let err = read(bytes, ReadOptions::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStream);
        assert_eq!(err.tag(), Some(Tag(0x0010, 0x0020)));

        let err = read(bytes, ReadOptions::default().max_value_len(8)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthViolation);
    }

    #[test]
    fn depth_limit() {
        let err = read(NESTED_UNDEFINED, ReadOptions::default().max_depth(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedStream);
        assert_eq!(err.tag(), Some(tags::REFERENCED_IMAGE_SEQUENCE));
    }

    #[test]
    fn implicit_vr_resolution() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0028,0100) BitsAllocated, len 2: 8
            0x28, 0x00, 0x00, 0x01, 0x02, 0x00, 0x00, 0x00,
            0x08, 0x00,
            // (0028,0103) PixelRepresentation, len 2: 1
            0x28, 0x00, 0x03, 0x01, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x00,
            // (0028,0106) SmallestImagePixelValue, len 2
            0x28, 0x00, 0x06, 0x01, 0x02, 0x00, 0x00, 0x00,
            0xFF, 0xFF,
            // (0029,0010) private creator, len 4
            0x29, 0x00, 0x10, 0x00, 0x04, 0x00, 0x00, 0x00,
            b'A', b'C', b'M', b'E',
            // (0029,1001) private, len 2
            0x29, 0x00, 0x01, 0x10, 0x02, 0x00, 0x00, 0x00,
            0x00, 0x00,
            // (7FE0,0010) PixelData, len 2
            0xE0, 0x7F, 0x10, 0x00, 0x02, 0x00, 0x00, 0x00,
            0x01, 0x02,
        ];
        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            bytes,
            &entries::IMPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .unwrap();
        let set = reader.read_dataset(|_| false).unwrap();
        assert_eq!(set.get(Tag(0x0028, 0x0106)).unwrap().vr(), VR::SS);
        assert_eq!(set.int(Tag(0x0028, 0x0106)), Some(-1));
        assert_eq!(set.get(Tag(0x0029, 0x0010)).unwrap().vr(), VR::LO);
        assert_eq!(set.get(Tag(0x0029, 0x1001)).unwrap().vr(), VR::UN);
        assert_eq!(set.get(tags::PIXEL_DATA).unwrap().vr(), VR::OB);
    }

    #[test]
    fn implicit_encapsulated_pixel_data() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (7FE0,0010) PixelData, undefined length
            0xE0, 0x7F, 0x10, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            // item, len 0: empty offset table
            0xFE, 0xFF, 0x00, 0xE0, 0x00, 0x00, 0x00, 0x00,
            // item, len 4
            0xFE, 0xFF, 0x00, 0xE0, 0x04, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04,
            // sequence delimiter
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        let dict = StandardDataDictionary::new();
        let mut reader = AttributeReader::new(
            bytes,
            &entries::IMPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .unwrap();
        let set = reader.read_dataset(|_| false).unwrap();
        let pixel_data = set.get(tags::PIXEL_DATA).unwrap();
        assert_eq!(pixel_data.vr(), VR::OW);
        let fragments = set.fragments(tags::PIXEL_DATA).unwrap();
        assert_eq!(fragments.len(), 2);
        assert!(fragments.fragments()[0].is_empty());
        assert_eq!(fragments.fragments()[1].bytes(), Some(&[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn explicit_un_sequence_is_implicit() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0008,1140) UN, undefined length
            0x08, 0x00, 0x40, 0x11, b'U', b'N', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            // item, undefined length
            0xFE, 0xFF, 0x00, 0xE0, 0xFF, 0xFF, 0xFF, 0xFF,
            // (0008,1150) implicit, len 4
            0x08, 0x00, 0x50, 0x11, 0x04, 0x00, 0x00, 0x00,
            b'1', b'.', b'2', 0x00,
            // item delimiter
            0xFE, 0xFF, 0x0D, 0xE0, 0x00, 0x00, 0x00, 0x00,
            // sequence delimiter
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        let set = read(bytes, ReadOptions::default()).unwrap();
        let attr = set.get(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(attr.vr(), VR::SQ);
        let items = attr.value().items().unwrap();
        assert_eq!(items[0].get(Tag(0x0008, 0x1150)).unwrap().vr(), VR::UI);
        assert_eq!(items[0].string(Tag(0x0008, 0x1150)).as_deref(), Some("1.2"));
    }

    #[test]
    fn fragments_with_bulk_data() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (7FE0,0010) OB, undefined length
            0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0xFF,
            // empty offset table
            0xFE, 0xFF, 0x00, 0xE0, 0x00, 0x00, 0x00, 0x00,
            // fragment, len 4
            0xFE, 0xFF, 0x00, 0xE0, 0x04, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04,
            // sequence delimiter
            0xFE, 0xFF, 0xDD, 0xE0, 0x00, 0x00, 0x00, 0x00,
        ];
        let set = read(bytes, ReadOptions::default()).unwrap();
        let fragments = set.fragments(tags::PIXEL_DATA).unwrap();
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments.fragments()[1].bytes(), Some(&[1u8, 2, 3, 4][..]));

        let dict = StandardDataDictionary::new();
        let mut creator = SourceUriCreator::new("file:///in.dcm");
        let mut reader = AttributeReader::new(
            bytes,
            &entries::EXPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default(),
        )
        .unwrap()
        .with_bulk_data_creator(&mut creator);
        let set = reader.read_dataset(|_| false).unwrap();
        let fragments = set.fragments(tags::PIXEL_DATA).unwrap();
        match &fragments.fragments()[1] {
            dcmio_core::Fragment::BulkData(bulk) => {
                assert_eq!(bulk.offset(), 28);
                assert_eq!(bulk.length(), 4);
            }
            other => panic!("expected bulk data, got {:?}", other),
        }
    }

    #[test]
    fn bulk_data_by_threshold() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0009,1010) OB, len 4
            0x09, 0x00, 0x10, 0x10, b'O', b'B', 0x00, 0x00, 0x04, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04,
            // (0009,1011) OB, len 6
            0x09, 0x00, 0x11, 0x10, b'O', b'B', 0x00, 0x00, 0x06, 0x00, 0x00, 0x00,
            0x01, 0x02, 0x03, 0x04, 0x05, 0x06,
        ];
        let dict = StandardDataDictionary::new();
        let rules = BulkDataRules::new().with_length_threshold(&[VR::OB], 4);
        let mut creator = SourceUriCreator::new("file:///in.dcm");
        let mut reader = AttributeReader::new(
            bytes,
            &entries::EXPLICIT_VR_LITTLE_ENDIAN,
            &dict,
            ReadOptions::default().bulk_data_rules(rules),
        )
        .unwrap()
        .with_bulk_data_creator(&mut creator);
        let set = reader.read_dataset(|_| false).unwrap();
        assert_eq!(set.bytes(Tag(0x0009, 0x1010)), Some(&[1u8, 2, 3, 4][..]));
        match set.value(Tag(0x0009, 0x1011)) {
            Some(Value::BulkData(bulk)) => {
                assert_eq!(bulk.locator(), "file:///in.dcm?offset=28&length=6");
            }
            other => panic!("expected bulk data, got {:?}", other),
        }
    }

    #[test]
    fn overrun_within_slack_is_recovered() {
        #[rustfmt::skip]
        let bytes: &[u8] = &[
            // (0008,1140) SQ, len 24 (actually 28)
            0x08, 0x00, 0x40, 0x11, b'S', b'Q', 0x00, 0x00, 0x18, 0x00, 0x00, 0x00,
            // item, len 20
            0xFE, 0xFF, 0x00, 0xE0, 0x14, 0x00, 0x00, 0x00,
            // (0008,1150) UI, len 12
            0x08, 0x00, 0x50, 0x11, b'U', b'I', 0x0C, 0x00,
            b'1', b'.', b'2', b'.', b'3', b'.', b'4', b'.',
            // the overrun bytes, read again as a header
            0x10, 0x00, 0x20, 0x00,
            b'L', b'O', 0x02, 0x00,
            b'I', b'D',
        ];
        let set = read(bytes, ReadOptions::default()).unwrap();
        let attr = set.get(tags::REFERENCED_IMAGE_SEQUENCE).unwrap();
        assert_eq!(attr.vr(), VR::UN);
        assert_eq!(attr.value().bytes().map(<[u8]>::len), Some(24));
        assert_eq!(set.string(Tag(0x0010, 0x0020)).as_deref(), Some("ID"));

        // no slack, no recovery
        let err = read(bytes, ReadOptions::default().overrun_slack(0)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthViolation);
        assert_eq!(err.tag(), Some(tags::REFERENCED_IMAGE_SEQUENCE));
        assert_eq!(err.position(), Some(12));
    }

    #[test]
    fn passthrough_bulk_data() {
        let locator = b"file:///blk?offset=0&length=6";
        let mut bytes = vec![
            // (7FE0,0010) OB, passthrough length
            0xE0, 0x7F, 0x10, 0x00, b'O', b'B', 0x00, 0x00, 0xFB, 0xFB, 0x00, 0x00,
            // flags: little endian
            0x00, 0x00,
        ];
        bytes.extend_from_slice(&(locator.len() as u32).to_le_bytes());
        bytes.extend_from_slice(locator);
        bytes.push(0);

        let set = read(&bytes, ReadOptions::default().bulk_data_passthrough(true)).unwrap();
        let bulk = set.bulk_data(tags::PIXEL_DATA).unwrap();
        assert_eq!(bulk.uri(), "file:///blk");
        assert_eq!(bulk.length(), 6);
        assert!(!bulk.is_big_endian());
    }
}

//! Parsed matrix elements
//!
//! A [`Variable`] is the header of one `miMATRIX` element (array flags,
//! dimensions, name) plus the undecoded class payload. Payload arrays are
//! decoded on request only, so probing never materializes data.

use std::borrow::Cow;

use linmat_core::format::numeric::{decode_f64s, decode_indices};
use linmat_core::{
    checked_element_count, ArrayClass, ArrayFlags, ByteOrder, CscArrays, DataType, Element,
    ElementReader, FormatError, Result,
};

/// One stored variable
///
/// The bytes are borrowed from the container when stored plainly and owned
/// when they had to be inflated.
#[derive(Debug, Clone)]
pub struct Variable<'a> {
    name: String,
    flags: ArrayFlags,
    dims: Vec<usize>,
    bytes: Cow<'a, [u8]>,
    payload_offset: usize,
    order: ByteOrder,
}

impl<'a> Variable<'a> {
    /// Parse the contents of a `miMATRIX` element (without its tag)
    ///
    /// A zero-length element is the empty-array placeholder and yields a
    /// variable of class [`ArrayClass::Empty`] with no dimensions.
    pub fn parse(bytes: Cow<'a, [u8]>, order: ByteOrder) -> Result<Self> {
        if bytes.is_empty() {
            return Ok(Self {
                name: String::new(),
                flags: ArrayFlags::new(ArrayClass::Empty),
                dims: Vec::new(),
                bytes,
                payload_offset: 0,
                order,
            });
        }

        let mut reader = ElementReader::new(&bytes, order);

        let flags_element = reader.expect_element()?;
        if flags_element.data_type() != Some(DataType::UInt32)
            || flags_element.data.len() != ArrayFlags::SIZE
        {
            return Err(FormatError::InvalidTag);
        }
        let flags = ArrayFlags::from_words(
            order.read_u32(&flags_element.data[..4])?,
            order.read_u32(&flags_element.data[4..])?,
        )?;

        let dims_element = reader.expect_element()?;
        let dims = decode_indices(dims_element.require_data_type()?, dims_element.data, order)?;

        let name_element = reader.expect_element()?;
        let name = decode_name(name_element.data);

        let payload_offset = reader.position();
        Ok(Self {
            name,
            flags,
            dims,
            bytes,
            payload_offset,
            order,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn flags(&self) -> ArrayFlags {
        self.flags
    }

    pub fn class(&self) -> ArrayClass {
        self.flags.class
    }

    /// Declared dimensions
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// Declared rank, the number of stored dimensions
    pub fn rank(&self) -> usize {
        self.dims.len()
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Product of the declared dimensions
    pub fn declared_len(&self) -> Result<usize> {
        checked_element_count(&self.dims)
    }

    /// Reader positioned at the first class-specific sub-element
    pub fn payload(&self) -> ElementReader<'_> {
        let start = self.payload_offset.min(self.bytes.len());
        ElementReader::new(&self.bytes[start..], self.order)
    }

    /// Real-part sub-element of a numeric or sparse array
    pub fn real_part(&self) -> Result<Element<'_>> {
        let mut reader = self.payload();
        match self.class() {
            ArrayClass::Sparse => {
                reader.expect_element()?;
                reader.expect_element()?;
            }
            class if class.is_numeric() => {}
            _ => return Err(FormatError::InvalidTag),
        }
        reader.expect_element()
    }

    /// Stored element type of the real part, `None` for non-numeric classes
    pub fn element_type(&self) -> Option<DataType> {
        self.real_part().ok()?.data_type()
    }

    /// Real part widened to `f64`
    pub fn real_values(&self) -> Result<Vec<f64>> {
        let part = self.real_part()?;
        decode_f64s(part.require_data_type()?, part.data, self.order)
    }

    /// Located `ir`, `jc` and `pr` sub-elements of a sparse array
    pub fn sparse_parts(&self) -> Result<SparseParts<'_>> {
        if self.class() != ArrayClass::Sparse {
            return Err(FormatError::InvalidTag);
        }
        let (nrows, ncols) = match self.dims[..] {
            [nrows, ncols] => (nrows, ncols),
            _ => return Err(FormatError::ShapeMismatch),
        };

        let mut reader = self.payload();
        Ok(SparseParts {
            nrows,
            ncols,
            row_indices: reader.expect_element()?,
            col_ptrs: reader.expect_element()?,
            values: reader.expect_element()?,
            order: self.order,
        })
    }

    /// Compressed-column arrays of a sparse array, unvalidated
    pub fn sparse_arrays(&self) -> Result<CscArrays> {
        let parts = self.sparse_parts()?;
        let ir = parts.row_indices;
        let pr = parts.values;
        let row_indices = decode_indices(ir.require_data_type()?, ir.data, self.order)?;
        let values = decode_f64s(pr.require_data_type()?, pr.data, self.order)?;
        Ok(CscArrays::from_raw(
            parts.nrows,
            parts.ncols,
            values,
            row_indices,
            parts.col_ptrs()?,
        ))
    }

    /// Named fields of a struct array, in stored order
    ///
    /// Only the first element of a struct array is read.
    pub fn fields(&self) -> Result<Vec<(String, Variable<'_>)>> {
        if self.class() != ArrayClass::Struct {
            return Err(FormatError::InvalidTag);
        }
        let mut reader = self.payload();

        let length_element = reader.expect_element()?;
        let name_len = self.order.read_i32(length_element.data)?;
        let name_len = usize::try_from(name_len).map_err(|_| FormatError::NegativeValue)?;

        let names = reader.expect_element()?;
        if name_len == 0 {
            return if names.data.is_empty() {
                Ok(Vec::new())
            } else {
                Err(FormatError::InvalidTag)
            };
        }
        if names.data.len() % name_len != 0 {
            return Err(FormatError::ArrayAlignment);
        }

        let mut fields = Vec::with_capacity(names.data.len() / name_len);
        for raw_name in names.data.chunks_exact(name_len) {
            let element = reader.expect_element()?;
            if element.data_type() != Some(DataType::Matrix) {
                return Err(FormatError::InvalidTag);
            }
            let field = Variable::parse(Cow::Borrowed(element.data), self.order)?;
            fields.push((decode_name(raw_name), field));
        }
        Ok(fields)
    }

    /// Field `name` of a struct array
    pub fn field(&self, name: &str) -> Result<Option<Variable<'_>>> {
        Ok(self
            .fields()?
            .into_iter()
            .find_map(|(field_name, field)| (field_name == name).then_some(field)))
    }
}

/// Undecoded arrays of one sparse variable
#[derive(Debug, Clone, Copy)]
pub struct SparseParts<'e> {
    pub nrows: usize,
    pub ncols: usize,
    pub row_indices: Element<'e>,
    pub col_ptrs: Element<'e>,
    pub values: Element<'e>,
    order: ByteOrder,
}

impl SparseParts<'_> {
    /// Decoded column pointers
    pub fn col_ptrs(&self) -> Result<Vec<usize>> {
        let jc = self.col_ptrs;
        decode_indices(jc.require_data_type()?, jc.data, self.order)
    }

    /// Whole slots held by both `ir` and `pr`, counted from their byte lengths
    pub fn stored_slots(&self) -> Result<usize> {
        Ok(slot_count(&self.row_indices)?.min(slot_count(&self.values)?))
    }
}

fn slot_count(element: &Element<'_>) -> Result<usize> {
    let width = element
        .require_data_type()?
        .size_bytes()
        .ok_or(FormatError::InvalidTag)?;
    Ok(element.data.len() / width)
}

fn decode_name(raw: &[u8]) -> String {
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

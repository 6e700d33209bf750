//! Node metadata written by SLiM.
//!
//! SLiM stores a fixed-size binary record for every genome (node):
//!
//! | bytes | field         |
//! |-------|---------------|
//! | 0..8  | genome id (`i64`, little endian) |
//! | 8     | `is_null` flag |
//! | 9     | genome type   |
//!
//! Haploid models are encoded as diploids where the second genome of
//! every individual is a placeholder with `is_null` set.  Only the
//! first nine bytes are needed to decide whether a node is a
//! placeholder, so records with a missing genome type are accepted.

use thiserror::Error;
use tskit::metadata::{
    EdgeMetadata, IndividualMetadata, MetadataError, MetadataRoundtrip, MutationMetadata,
    NodeMetadata, PopulationMetadata, SiteMetadata,
};

/// Size in bytes of a complete SLiM node record.
pub const SLIM_NODE_METADATA_SIZE: usize = 10;

const IS_NULL_OFFSET: usize = 8;
const GENOME_TYPE_OFFSET: usize = 9;

/// Errors decoding SLiM node metadata.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SlimMetadataError {
    /// The record is too short to contain the `is_null` flag.
    #[error("node metadata has {0} bytes, at least 9 are required")]
    TooShort(usize),
    /// The genome type byte is not one SLiM writes.
    #[error("unknown genome type {0}")]
    UnknownGenomeType(u8),
}

/// The chromosome a SLiM genome models.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum GenomeType {
    /// An autosome
    Autosome = 0,
    /// An X chromosome
    XChromosome = 1,
    /// A Y chromosome
    YChromosome = 2,
}

impl TryFrom<u8> for GenomeType {
    type Error = SlimMetadataError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Autosome),
            1 => Ok(Self::XChromosome),
            2 => Ok(Self::YChromosome),
            x => Err(SlimMetadataError::UnknownGenomeType(x)),
        }
    }
}

/// Decoded SLiM node metadata.
///
/// # Examples
///
/// ```
/// use coalescent_tree_core::metadata::{GenomeType, SlimNodeMetadata};
/// use tskit::metadata::MetadataRoundtrip;
///
/// let md = SlimNodeMetadata::new(12, true);
/// let bytes = md.encode().unwrap();
/// assert_eq!(bytes.len(), 10);
/// let decoded = SlimNodeMetadata::decode(&bytes).unwrap();
/// assert!(decoded.is_null);
/// assert_eq!(decoded.genome_type, GenomeType::Autosome);
/// ```
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct SlimNodeMetadata {
    /// SLiM's genome identifier
    pub genome_id: i64,
    /// `true` for a placeholder genome
    pub is_null: bool,
    /// Chromosome type
    pub genome_type: GenomeType,
}

impl SlimNodeMetadata {
    /// An autosomal genome record.
    pub fn new(genome_id: i64, is_null: bool) -> Self {
        Self {
            genome_id,
            is_null,
            genome_type: GenomeType::Autosome,
        }
    }

    /// Read a record from raw bytes.
    ///
    /// A record truncated after the `is_null` byte is read as an autosome.
    pub fn from_bytes(md: &[u8]) -> Result<Self, SlimMetadataError> {
        if md.len() <= IS_NULL_OFFSET {
            return Err(SlimMetadataError::TooShort(md.len()));
        }
        let mut id = [0_u8; IS_NULL_OFFSET];
        id.copy_from_slice(&md[..IS_NULL_OFFSET]);
        let genome_type = match md.get(GENOME_TYPE_OFFSET) {
            Some(&t) => GenomeType::try_from(t)?,
            None => GenomeType::Autosome,
        };
        Ok(Self {
            genome_id: i64::from_le_bytes(id),
            is_null: md[IS_NULL_OFFSET] != 0,
            genome_type,
        })
    }

    /// The 10-byte SLiM encoding.
    pub fn to_bytes(&self) -> [u8; SLIM_NODE_METADATA_SIZE] {
        let mut rv = [0_u8; SLIM_NODE_METADATA_SIZE];
        rv[..IS_NULL_OFFSET].copy_from_slice(&self.genome_id.to_le_bytes());
        rv[IS_NULL_OFFSET] = u8::from(self.is_null);
        rv[GENOME_TYPE_OFFSET] = self.genome_type as u8;
        rv
    }
}

/// Read only the `is_null` flag of a SLiM node record.
///
/// Unlike [`SlimNodeMetadata::from_bytes`], the genome type byte is
/// not inspected.
pub fn read_is_null(md: &[u8]) -> Result<bool, SlimMetadataError> {
    match md.get(IS_NULL_OFFSET) {
        Some(&flag) => Ok(flag != 0),
        None => Err(SlimMetadataError::TooShort(md.len())),
    }
}

impl MetadataRoundtrip for SlimNodeMetadata {
    fn encode(&self) -> Result<Vec<u8>, MetadataError> {
        Ok(self.to_bytes().to_vec())
    }

    fn decode(md: &[u8]) -> Result<Self, MetadataError> {
        Self::from_bytes(md).map_err(|e| MetadataError::RoundtripError { value: Box::new(e) })
    }
}

impl NodeMetadata for SlimNodeMetadata {}

/// Metadata copied between tables without being interpreted.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawMetadata(pub Vec<u8>);

impl MetadataRoundtrip for RawMetadata {
    fn encode(&self) -> Result<Vec<u8>, MetadataError> {
        Ok(self.0.clone())
    }

    fn decode(md: &[u8]) -> Result<Self, MetadataError> {
        Ok(Self(md.to_vec()))
    }
}

impl NodeMetadata for RawMetadata {}
impl EdgeMetadata for RawMetadata {}
impl SiteMetadata for RawMetadata {}
impl MutationMetadata for RawMetadata {}
impl PopulationMetadata for RawMetadata {}
impl IndividualMetadata for RawMetadata {}

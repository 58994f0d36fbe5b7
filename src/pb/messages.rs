//! Request and response messages for the four cellphone RPCs.

use super::Cellphone;

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateCellphoneRequest {
    #[prost(message, optional, tag = "1")]
    pub cellphone: Option<Cellphone>,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct CreateCellphoneResponse {
    #[prost(string, tag = "1")]
    pub id: String,
}

/// Conjunctive search query. Thresholds are inclusive minimums; an empty
/// `brands` list matches every brand.
#[derive(Clone, PartialEq, prost::Message)]
pub struct FilterCondition {
    #[prost(uint32, tag = "1")]
    pub min_cpu_core: u32,
    #[prost(uint32, tag = "2")]
    pub min_ram_size: u32,
    #[prost(uint32, tag = "3")]
    pub min_storage_size: u32,
    #[prost(uint32, tag = "4")]
    pub min_battery_capacity: u32,
    #[prost(string, repeated, tag = "5")]
    pub brands: Vec<String>,
}

/// Describes the cover image that follows. Always the first upload message.
#[derive(Clone, PartialEq, prost::Message)]
pub struct CoverMetaInfo {
    #[prost(string, tag = "1")]
    pub id: String,
    /// File extension including the dot, e.g. `.png`.
    #[prost(string, tag = "2")]
    pub image_type: String,
    /// Declared size in bytes.
    #[prost(uint32, tag = "3")]
    pub size: u32,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadCellphoneCoverRequest {
    #[prost(oneof = "upload_cellphone_cover_request::Data", tags = "1, 2")]
    pub data: Option<upload_cellphone_cover_request::Data>,
}

pub mod upload_cellphone_cover_request {
    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum Data {
        #[prost(message, tag = "1")]
        Meta(super::CoverMetaInfo),
        #[prost(bytes = "vec", tag = "2")]
        Block(Vec<u8>),
    }
}

impl UploadCellphoneCoverRequest {
    pub fn meta(meta: CoverMetaInfo) -> Self {
        Self {
            data: Some(upload_cellphone_cover_request::Data::Meta(meta)),
        }
    }

    pub fn block(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            data: Some(upload_cellphone_cover_request::Data::Block(bytes.into())),
        }
    }
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct UploadCellphoneCoverResponse {
    #[prost(string, tag = "1")]
    pub id: String,
    /// Bytes actually written, not the declared size.
    #[prost(uint64, tag = "2")]
    pub size: u64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BuyCellphoneRequest {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(double, tag = "2")]
    pub price: f64,
}

#[derive(Clone, PartialEq, prost::Message)]
pub struct BuyCellphoneResponse {
    #[prost(string, tag = "1")]
    pub id: String,
    /// Average price over every purchase of `id` so far, across all calls.
    #[prost(double, tag = "2")]
    pub avg: f64,
}

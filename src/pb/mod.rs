//! Wire types for the `cellphone.CellphoneService` gRPC service.
//!
//! Messages are plain prost structs (standard protobuf wire format, no
//! `.proto` file). The client and server stubs are generated by `build.rs`
//! with `tonic_build::manual`.

mod cellphone;
mod messages;

pub use cellphone::{
    Battery, Camera, Cellphone, Cpu, DdrType, Gpu, OperatingSystem, Ram, Screen, Storage,
    StorageType, Unit,
};
pub use messages::{
    upload_cellphone_cover_request, BuyCellphoneRequest, BuyCellphoneResponse, CoverMetaInfo,
    CreateCellphoneRequest, CreateCellphoneResponse, FilterCondition,
    UploadCellphoneCoverRequest, UploadCellphoneCoverResponse,
};

include!(concat!(env!("OUT_DIR"), "/cellphone.CellphoneService.rs"));

pub use cellphone_service_client::CellphoneServiceClient;
pub use cellphone_service_server::{CellphoneService, CellphoneServiceServer};

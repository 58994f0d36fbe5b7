fn main() {
    // Stubs for the cellphone service. Message types are hand-written prost
    // structs in `src/pb`, so no .proto file or protoc is involved.
    let method = |name: &str, route: &str, input: &str, output: &str| {
        tonic_build::manual::Method::builder()
            .name(name)
            .route_name(route)
            .input_type(format!("crate::pb::{input}"))
            .output_type(format!("crate::pb::{output}"))
            .codec_path("tonic::codec::ProstCodec")
    };

    let service = tonic_build::manual::Service::builder()
        .name("CellphoneService")
        .package("cellphone")
        .method(
            method(
                "create_cellphone",
                "CreateCellphone",
                "CreateCellphoneRequest",
                "CreateCellphoneResponse",
            )
            .build(),
        )
        .method(
            method("search_cellphone", "SearchCellphone", "FilterCondition", "Cellphone")
                .server_streaming()
                .build(),
        )
        .method(
            method(
                "upload_cellphone_cover",
                "UploadCellphoneCover",
                "UploadCellphoneCoverRequest",
                "UploadCellphoneCoverResponse",
            )
            .client_streaming()
            .build(),
        )
        .method(
            method(
                "buy_cellphone",
                "BuyCellphone",
                "BuyCellphoneRequest",
                "BuyCellphoneResponse",
            )
            .client_streaming()
            .server_streaming()
            .build(),
        )
        .build();

    tonic_build::manual::Builder::new().compile(&[service]);
}

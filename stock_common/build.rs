//! Compiles `proto/stock.proto` into tonic client/server stubs and emits the
//! encoded descriptor set used by the reflection service.
use std::env;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = prost_build::Config::new();
    config.protoc_executable(protoc_bin_vendored::protoc_bin_path()?);

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    let includes = [PathBuf::from("proto"), protoc_bin_vendored::include_path()?];
    tonic_build::configure()
        .file_descriptor_set_path(out_dir.join("stock_descriptor.bin"))
        .compile_protos_with_config(config, &[PathBuf::from("proto/stock.proto")], &includes)?;

    println!("cargo:rerun-if-changed=proto/stock.proto");
    Ok(())
}

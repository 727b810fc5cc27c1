fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Point prost-build at a protoc binary if one is not already provided by
    // the environment. The vendored binary keeps the build hermetic on hosts
    // where protoc is not installed system-wide.
    if std::env::var_os("PROTOC").is_none() {
        if let Ok(protoc) = protoc_bin_vendored::protoc_bin_path() {
            std::env::set_var("PROTOC", protoc);
        }
    }
    tonic_build::compile_protos("proto/entlook.proto")?;
    Ok(())
}

fn main() {
    tonic_build::configure()
        .type_attribute(".", "#[derive(serde::Deserialize, serde::Serialize)]")
        .compile(&["proto/rpc.proto"], &["./proto"])
        .unwrap_or_else(|e| panic!("Failed to compile proto, error is {:?}", e));
}

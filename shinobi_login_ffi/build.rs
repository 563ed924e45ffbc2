fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap();

    // 生成 C 头文件供宿主工程引用
    if let Ok(bindings) = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_language(cbindgen::Language::C)
        .with_include_guard("SHINOBI_LOGIN_H")
        .generate()
    {
        bindings.write_to_file("include/shinobi_login.h");
    }

    println!("cargo:rerun-if-changed=src/lib.rs");
}

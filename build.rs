fn main() {
    // Only the ESP-IDF build carries linker args from esp-idf-sys.
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}

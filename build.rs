fn main() {
    // Host builds (`--no-default-features`) have no ESP-IDF toolchain to link.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

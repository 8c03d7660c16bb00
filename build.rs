fn main() {
    // ESP-IDF link arguments are only needed for the on-target binary.
    // Host builds (unit + integration tests) skip embuild entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}

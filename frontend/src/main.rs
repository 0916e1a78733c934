//! Entry point for the WASM application

pub fn main() {
    resume_upload::start();
}

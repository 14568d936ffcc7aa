#![allow(dead_code)]

pub mod can;
pub mod sim;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

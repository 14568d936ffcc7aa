#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
mod std_items {
    pub use std::collections::HashMap;
}

#[cfg(all(target_arch = "x86_64", target_os = "linux"))]
pub use std_items::*;

#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
mod no_std_items {
    pub use hashbrown::HashMap;
}

#[cfg(not(all(target_arch = "x86_64", target_os = "linux")))]
pub use no_std_items::*;

pub use alloc::borrow::ToOwned;
pub use alloc::format;
pub use alloc::string::String;
pub use alloc::vec;
pub use alloc::vec::Vec;
pub use core::fmt;
pub use core::fmt::Debug;
pub use core::time::Duration;

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        let value_str = alloc::format!($($arg)*);
        #[cfg(all(target_arch = "x86_64", target_os = "linux"))]
        {
            log::info!("[commission] {}", value_str);
        }
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        {
            defmt::info!("[commission] {}", defmt::Debug2Format(&value_str));
        }
    };
}

#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        let value_str = alloc::format!($($arg)*);
        #[cfg(all(target_arch = "x86_64", target_os = "linux"))]
        {
            log::debug!("[commission] {}", value_str);
        }
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        {
            defmt::debug!("[commission] {}", defmt::Debug2Format(&value_str));
        }
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        let value_str = alloc::format!($($arg)*);
        #[cfg(all(target_arch = "x86_64", target_os = "linux"))]
        {
            log::warn!("[commission] {}", value_str);
        }
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        {
            defmt::warn!("[commission] {}", defmt::Debug2Format(&value_str));
        }
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        let value_str = alloc::format!($($arg)*);
        #[cfg(all(target_arch = "x86_64", target_os = "linux"))]
        {
            log::error!("[commission] {}", value_str);
        }
        #[cfg(all(target_arch = "arm", target_os = "none"))]
        {
            defmt::error!("[commission] {}", defmt::Debug2Format(&value_str));
        }
    };
}

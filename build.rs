// Copyright (c) 2025 Kevin Thomas
// Licensed under the MIT License. See LICENSE file in the project root for full license information.

//! Build script for the serial robot firmware
//!
//! For the RP2350 target this script places the memory layout where the
//! linker can find it:
//! - Copies `memory.x` to the build output directory
//! - Adds that directory to the linker search path
//! - Re-runs when `memory.x` changes
//!
//! Host builds (library tests) skip all of this.
//!
//! # Memory Layout
//! The `memory.x` file defines the RP2350's memory regions:
//! - **FLASH**: 4MB starting at 0x10000000 (program code storage)
//! - **RAM**: 512KB starting at 0x20000000 (runtime data)
//! - **SRAM8**: 4KB starting at 0x20080000 (dedicated memory bank 8)
//! - **SRAM9**: 4KB starting at 0x20081000 (dedicated memory bank 9)
//!
//! # Linker Integration
//! `-Tlink.x` and `-Tdefmt.x` are passed from `.cargo/config.toml` for the
//! `thumbv8m.main-none-eabihf` target only.

use std::env;
use std::fs;
use std::path::PathBuf;

/// Firmware target triple
const FIRMWARE_TARGET: &str = "thumbv8m.main-none-eabihf";

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    if env::var("TARGET").as_deref() != Ok(FIRMWARE_TARGET) {
        return;
    }

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("memory.x"), include_bytes!("memory.x")).expect("write memory.x");
    println!("cargo:rustc-link-search={}", out.display());
}

//! # Fumo Desktop Entry Point
//!
//! Thin binary around [`fumo_desktop_lib::run`]; startup lives in the
//! library so it can be shared with mobile targets.

// Prevents an additional console window on Windows in release.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    fumo_desktop_lib::run()
}

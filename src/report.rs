//! Console output for the operator.
use colored::Colorize;
use serde::Serialize;

pub fn success(message: impl AsRef<str>) {
    println!("[+] {}", message.as_ref());
}

pub fn success_heading(message: impl AsRef<str>) {
    println!("{}", format!("[+] {}", message.as_ref()).blue());
}

pub fn info(message: impl AsRef<str>) {
    println!("{}", format!("[*] {}", message.as_ref()).green());
}

pub fn missing(message: impl AsRef<str>) {
    println!("{}", format!("[-] {}", message.as_ref()).blue());
}

pub fn failure(message: impl AsRef<str>) {
    println!("{}", format!("[!] {}", message.as_ref()).red());
}

/// Print the full error chain on stderr.
pub fn error(error: &anyhow::Error) {
    eprintln!("{}", format!("[!] {error}").red());
    for cause in error.chain().skip(1) {
        eprintln!("{}", format!("    caused by: {cause}").red());
    }
}

pub fn json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(err) => tracing::warn!("cannot render value as JSON: {err}"),
    }
}

pub fn blank() {
    println!();
}

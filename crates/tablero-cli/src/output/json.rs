use serde::Serialize;
use tablero_core::error::TableroError;

pub fn print<T: Serialize + ?Sized>(value: &T) -> Result<(), TableroError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}

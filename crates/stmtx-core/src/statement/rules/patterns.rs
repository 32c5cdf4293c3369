//! Common regex patterns for statement layouts.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Banorte: 01-ENE-24
    pub static ref DATE_DD_MON_YY: Regex = Regex::new(
        r"^\d{2}-[A-Z]{3}-\d{2}$"
    ).unwrap();

    // Citibanamex grid cells: 01 ENE, 01-ENE, 01/ENE
    pub static ref DATE_DD_MON_CELL: Regex = Regex::new(
        r"^\d{2}[-/\s][A-Z]{3}"
    ).unwrap();

    // Day + Spanish month word opening a text line, with the rest captured
    pub static ref DATE_DAY_MONTH_LINE: Regex = Regex::new(
        r"^\s*(\d{1,2}\s+[A-ZÁÉÍÓÚÜÑ]+)\s+(.*)"
    ).unwrap();

    pub static ref DATE_DAY_MONTH_PREFIX: Regex = Regex::new(
        r"^\d{1,2}\s+[A-ZÁÉÍÓÚÜÑ]+"
    ).unwrap();

    // Amount + balance closing a line
    pub static ref TRAILING_AMOUNT_PAIR: Regex = Regex::new(
        r"(\d{1,3}(?:,\d{3})*\.\d{2})\s+(\d{1,3}(?:,\d{3})*\.\d{2})$"
    ).unwrap();

    pub static ref DEPOSIT_KEYWORDS: Regex = Regex::new(
        r"(?i)\b(DEPÓSITO|DEPOSITO|ABONO|INGRESO|RECIBIDO)\b"
    ).unwrap();

    // Branch/teller/authorization/trace lines inside a movement block
    pub static ref NOISE_LINE: Regex = Regex::new(
        r"(?i)^(SUC|CAJA|AUT|RASTREO|CITA)\b"
    ).unwrap();

    pub static ref WIDE_GAP: Regex = Regex::new(r"\s{2,}").unwrap();

    pub static ref NON_NUMERIC: Regex = Regex::new(r"[^\d\.]").unwrap();

    // Transaction-looking lines: date prefix plus an amount later on
    pub static ref LINE_DD_MON_YY: Regex = Regex::new(
        r"^\d{2}-[A-Z]{3}-\d{2}\b.*\d[\d,]+\.\d{2}"
    ).unwrap();

    pub static ref LINE_DD_MON: Regex = Regex::new(
        r"^\d{2}[-/\s][A-Z]{3}\b.*\d[\d,]+\.\d{2}"
    ).unwrap();

    pub static ref LINE_DAY_MONTH: Regex = Regex::new(
        r"^\s*\d{1,2}\s+[A-ZÁÉÍÓÚÜÑ]+\b.*\d[\d,]+\.\d{2}"
    ).unwrap();
}

mod enums;
mod ingest;
mod jwt;
mod payroll;
mod uploads;
mod validation;

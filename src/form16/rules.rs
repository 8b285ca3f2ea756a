//! Field rules: one label pattern, one field
//!
//! Every rule runs against the full document text and is independent of the
//! others. Patterns are tied to the wording and line layout of the TRACES
//! generated Form 16 (Part A / Part B).

use super::lookup::{clean_capture, find, find_pair};
use crate::error::{Form16Error, Result};
use regex::Regex;
use std::sync::LazyLock;

macro_rules! patterns {
    ($($name:ident = $re:literal;)+) => {
        $(
            static $name: LazyLock<Regex> = LazyLock::new(|| Regex::new($re).unwrap());
        )+
    };
}

patterns! {
    CERTIFICATE_NO = r"Certificate Number:\s*(\S+)";
    UPDATED_ON = r"Last updated on\s*([\d\-A-Za-z]+)";
    ASSESSMENT_YEAR = r"Assessment Year\s*([\d\-]+)";

    // Group 3 only terminates the address; Karnataka is tried before any word
    EMPLOYER_BLOCK = r"Name and address of the Employer.*?\n([\s\S]*?)\n([\s\S]*?),\s*(Karnataka|[\w\-]+)";
    EMPLOYER_CONTACT = r"\+\(91\)([\d\-]+)";
    EMPLOYER_EMAIL = r"([\w\.-]+@[\w\.-]+)";
    EMPLOYER_PAN = r"PAN of the Deductor\s*([\w\d]+)";
    EMPLOYER_TAN = r"TAN of the Deductor\s*([\w\d]+)";

    // Employee name is a single line, unlike the employer's
    EMPLOYEE_BLOCK = r"Name and address of the Employee.*?\n(.*?)\n([\s\S]*?),\s*(Karnataka|[\w\-]+)";
    EMPLOYEE_PAN = r"PAN of the Employee.*?\s([\w\d]+)";
    PERIOD_FROM = r"From\s([\d\-]+\w+)";
    PERIOD_TO = r"To\s([\d\-]+\w+)";

    GROSS_TOTAL = r"Total\s([\d\.]+)";
    SECTION_17_1 = r"17\(1\)\s([\d\.]+)";
    SECTION_17_3 = r"17\(3\)\s([\d\.]+)";
    STANDARD_DEDUCTION = r"Standard deduction under section 16\(ia\)\s([\d\.]+)";
    ENTERTAINMENT_ALLOWANCE = r"Entertainment allowance under section 16\(ii\)\s([\d\.]+)";
    TAX_ON_EMPLOYMENT = r"Tax on employment under section 16\(iii\)\s([\d\.]+)";
    SALARY_RECEIVED = r"Income chargeable.*\s([\d\.]+)";
    CHAPTER_VI_A_TOTAL = r"Chapter VI-A deductions.*\s([\d\.]+)";

    TOTAL_TAX = r"Total tax payable.*\s([\d\.]+)";
    SURCHARGE = r"Surcharge.*\s([\d\.]+)";
    REBATE_87A = r"Rebate under section 87A.*\s([\d\.]+)";
    HEALTH_EDUCATION_CESS = r"Health and education cess.*\s([\d\.]+)";
    RELIEF_89 = r"Relief under section 89.*\s([\d\.]+)";
    NET_TAX_PAYABLE = r"Net tax payable.*\s([\d\.]+)";

    PLACE = r"Place\s([^\n]+)";
    DATE = r"Date\s([\d\-A-Za-z]+)";
    VERIFIED_BY_NAME = r"Full Name:\s*([\w\s]+)";
    DESIGNATION = r"Designation:\s*([\w\s]+)";
}

/// Name and address read from a two-line party block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NameAndAddress {
    pub name: Option<String>,
    pub address: Option<String>,
}

fn name_and_address(pattern: &Regex, text: &str) -> NameAndAddress {
    match find_pair(pattern, text) {
        Some((name, address)) => NameAndAddress {
            name: clean_capture(name),
            address: clean_capture(address),
        },
        None => NameAndAddress::default(),
    }
}

// Certificate

pub fn certificate_no(text: &str) -> Option<String> {
    find(&CERTIFICATE_NO, text)
}

pub fn updated_on(text: &str) -> Option<String> {
    find(&UPDATED_ON, text)
}

pub fn assessment_year(text: &str) -> Option<String> {
    find(&ASSESSMENT_YEAR, text)
}

// Employer

pub fn employer_name_and_address(text: &str) -> NameAndAddress {
    name_and_address(&EMPLOYER_BLOCK, text)
}

/// Digits following the `+(91)` country prefix
pub fn employer_contact(text: &str) -> Option<String> {
    find(&EMPLOYER_CONTACT, text)
}

/// First email-shaped token in the document, lower-cased.
///
/// Unlike every other rule a miss here fails the whole extraction.
pub fn employer_email(text: &str) -> Result<String> {
    find(&EMPLOYER_EMAIL, text)
        .map(|email| email.to_lowercase())
        .ok_or(Form16Error::MissingEmail)
}

pub fn employer_pan(text: &str) -> Option<String> {
    find(&EMPLOYER_PAN, text)
}

pub fn employer_tan(text: &str) -> Option<String> {
    find(&EMPLOYER_TAN, text)
}

// Employee

pub fn employee_name_and_address(text: &str) -> NameAndAddress {
    name_and_address(&EMPLOYEE_BLOCK, text)
}

pub fn employee_pan(text: &str) -> Option<String> {
    find(&EMPLOYEE_PAN, text)
}

pub fn period_from(text: &str) -> Option<String> {
    find(&PERIOD_FROM, text)
}

pub fn period_to(text: &str) -> Option<String> {
    find(&PERIOD_TO, text)
}

// Salary

pub fn gross_salary_total(text: &str) -> Option<String> {
    find(&GROSS_TOTAL, text)
}

pub fn section_17_1(text: &str) -> Option<String> {
    find(&SECTION_17_1, text)
}

pub fn profits_in_lieu(text: &str) -> Option<String> {
    find(&SECTION_17_3, text)
}

pub fn standard_deduction(text: &str) -> Option<String> {
    find(&STANDARD_DEDUCTION, text)
}

pub fn entertainment_allowance(text: &str) -> Option<String> {
    find(&ENTERTAINMENT_ALLOWANCE, text)
}

pub fn tax_on_employment(text: &str) -> Option<String> {
    find(&TAX_ON_EMPLOYMENT, text)
}

/// "Income chargeable under the head Salaries", last figure on the line
pub fn salary_received(text: &str) -> Option<String> {
    find(&SALARY_RECEIVED, text)
}

pub fn chapter_vi_a_total(text: &str) -> Option<String> {
    find(&CHAPTER_VI_A_TOTAL, text)
}

// Tax

pub fn total_tax(text: &str) -> Option<String> {
    find(&TOTAL_TAX, text)
}

pub fn surcharge(text: &str) -> Option<String> {
    find(&SURCHARGE, text)
}

pub fn rebate_under_section_87a(text: &str) -> Option<String> {
    find(&REBATE_87A, text)
}

pub fn health_and_education_cess(text: &str) -> Option<String> {
    find(&HEALTH_EDUCATION_CESS, text)
}

pub fn relief_under_section_89(text: &str) -> Option<String> {
    find(&RELIEF_89, text)
}

pub fn net_tax_payable(text: &str) -> Option<String> {
    find(&NET_TAX_PAYABLE, text)
}

// Verification

pub fn place(text: &str) -> Option<String> {
    find(&PLACE, text)
}

pub fn date(text: &str) -> Option<String> {
    find(&DATE, text)
}

/// Signatory name, which may wrap onto following lines
pub fn verified_by_name(text: &str) -> Option<String> {
    find(&VERIFIED_BY_NAME, text).and_then(|name| clean_capture(&name))
}

/// Designation is kept as captured (trimmed only)
pub fn designation(text: &str) -> Option<String> {
    find(&DESIGNATION, text)
}

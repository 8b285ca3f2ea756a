//! Extraction engine: runs every field rule over one text blob

use super::record::*;
use super::rules::{self, NameAndAddress};
use crate::error::Result;

/// Log a rule miss and pass the value through
fn traced(field: &'static str, value: Option<String>) -> Option<String> {
    if value.is_none() {
        tracing::debug!(field, "no match");
    }
    value
}

/// Parse Form 16 text into a record.
///
/// Missing labels leave their fields as `None`; the only hard failure is a
/// document without any email address.
pub fn extract(text: &str) -> Result<ExtractionResult> {
    let certificate_details = CertificateDetails {
        certificate_no: traced("certificate_no", rules::certificate_no(text)),
        updated_on: traced("updated_on", rules::updated_on(text)),
        assessment_year: traced("assessment_year", rules::assessment_year(text)),
    };

    let NameAndAddress { name: employer_name, address: employer_address } =
        rules::employer_name_and_address(text);
    let employer_details = EmployerDetails {
        name: traced("employer.name", employer_name),
        address: traced("employer.address", employer_address),
        contact: traced("employer.contact", rules::employer_contact(text)),
        email: Some(rules::employer_email(text)?),
        pan: traced("employer.pan", rules::employer_pan(text)),
        tan: traced("employer.tan", rules::employer_tan(text)),
    };

    let NameAndAddress { name: employee_name, address: employee_address } =
        rules::employee_name_and_address(text);
    let employee_details = EmployeeDetails {
        name: traced("employee.name", employee_name),
        address: traced("employee.address", employee_address),
        pan: traced("employee.pan", rules::employee_pan(text)),
        period_with_employer: Period {
            from: traced("period.from", rules::period_from(text)),
            to: traced("period.to", rules::period_to(text)),
        },
    };

    let salary_details = SalaryDetails {
        gross_salary: GrossSalary {
            total: traced("gross_salary.total", rules::gross_salary_total(text)),
            breakup: SalaryBreakup {
                section_17_1: traced("section_17_1", rules::section_17_1(text)),
                profits_in_lieu: traced("profits_in_lieu", rules::profits_in_lieu(text)),
            },
        },
        deductions: Deductions {
            under_section_16: Section16Deductions {
                standard_deduction: traced("standard_deduction", rules::standard_deduction(text)),
                entertainment_allowance: traced(
                    "entertainment_allowance",
                    rules::entertainment_allowance(text),
                ),
                tax_on_employment: traced("tax_on_employment", rules::tax_on_employment(text)),
            },
        },
        income: Income::from_salary_received(traced(
            "salary_received",
            rules::salary_received(text),
        )),
        chapter_vi_a_deductions: ChapterViADeductions {
            total: traced("chapter_vi_a_deductions", rules::chapter_vi_a_total(text)),
        },
    };

    let tax_details = TaxDetails {
        total_tax: traced("total_tax", rules::total_tax(text)),
        surcharge: traced("surcharge", rules::surcharge(text)),
        rebate_under_section_87a: traced("rebate_87a", rules::rebate_under_section_87a(text)),
        health_and_education_cess: traced("cess", rules::health_and_education_cess(text)),
        relief_under_section_89: traced("relief_89", rules::relief_under_section_89(text)),
        net_tax_payable: traced("net_tax_payable", rules::net_tax_payable(text)),
    };

    let verification = Verification {
        place: traced("place", rules::place(text)),
        date: traced("date", rules::date(text)),
        verified_by: VerifiedBy {
            name: traced("verified_by.name", rules::verified_by_name(text)),
            designation: traced("verified_by.designation", rules::designation(text)),
        },
    };

    Ok(ExtractionResult {
        form_no: FORM_NO,
        certificate_details,
        employer_details,
        employee_details,
        salary_details,
        tax_details,
        verification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Form16Error;

    #[test]
    fn test_minimal_text_only_needs_an_email() {
        let result = extract("contact: hr@example.com").unwrap();
        assert_eq!(result.form_no, 16);
        assert_eq!(result.employer_details.email.as_deref(), Some("hr@example.com"));
        assert_eq!(result.populated_fields(), 1);
    }

    #[test]
    fn test_no_email_fails_whole_record() {
        let err = extract("Certificate Number: ABC123").unwrap_err();
        assert!(matches!(err, Form16Error::MissingEmail));
    }

    #[test]
    fn test_certificate_scenario() {
        let result = extract("Certificate Number: ABC123\nhr@example.com").unwrap();
        assert_eq!(result.certificate_details.certificate_no.as_deref(), Some("ABC123"));
        assert_eq!(result.certificate_details.assessment_year, None);
    }

    #[test]
    fn test_section_17_1_scenario() {
        let result = extract("hr@example.com\n17(1) 500000.00\n").unwrap();
        assert_eq!(
            result.salary_details.gross_salary.breakup.section_17_1.as_deref(),
            Some("500000.00")
        );
    }

    #[test]
    fn test_income_aliases_salary_received() {
        let result = extract("hr@example.com\nIncome chargeable under the head Salaries 447600.00").unwrap();
        let income = &result.salary_details.income;
        assert_eq!(income.salary_received.as_deref(), Some("447600.00"));
        assert_eq!(income.gross_total_income, income.salary_received);
        assert_eq!(income.taxable_income, income.salary_received);

        let result = extract("hr@example.com").unwrap();
        let income = &result.salary_details.income;
        assert_eq!(income.salary_received, None);
        assert_eq!(income.gross_total_income, None);
        assert_eq!(income.taxable_income, None);
    }
}

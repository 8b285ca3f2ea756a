//! Output record for a parsed Form 16
//!
//! Shape is fixed: every key is always serialized, absent leaves become `null`.

use serde::{Deserialize, Serialize};

/// Form number reported in every record
pub const FORM_NO: u8 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub form_no: u8,
    pub certificate_details: CertificateDetails,
    pub employer_details: EmployerDetails,
    pub employee_details: EmployeeDetails,
    pub salary_details: SalaryDetails,
    pub tax_details: TaxDetails,
    pub verification: Verification,
}

impl Default for ExtractionResult {
    fn default() -> Self {
        Self {
            form_no: FORM_NO,
            certificate_details: CertificateDetails::default(),
            employer_details: EmployerDetails::default(),
            employee_details: EmployeeDetails::default(),
            salary_details: SalaryDetails::default(),
            tax_details: TaxDetails::default(),
            verification: Verification::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CertificateDetails {
    pub certificate_no: Option<String>,
    pub updated_on: Option<String>,
    pub assessment_year: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployerDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub contact: Option<String>,
    /// Always lower-cased
    pub email: Option<String>,
    pub pan: Option<String>,
    pub tan: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeDetails {
    pub name: Option<String>,
    pub address: Option<String>,
    pub pan: Option<String>,
    pub period_with_employer: Period,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Period {
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryDetails {
    pub gross_salary: GrossSalary,
    pub deductions: Deductions,
    pub income: Income,
    pub chapter_vi_a_deductions: ChapterViADeductions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GrossSalary {
    pub total: Option<String>,
    pub breakup: SalaryBreakup,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SalaryBreakup {
    pub section_17_1: Option<String>,
    pub profits_in_lieu: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deductions {
    pub under_section_16: Section16Deductions,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section16Deductions {
    pub standard_deduction: Option<String>,
    pub entertainment_allowance: Option<String>,
    pub tax_on_employment: Option<String>,
}

/// `gross_total_income` and `taxable_income` mirror `salary_received`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Income {
    pub salary_received: Option<String>,
    pub gross_total_income: Option<String>,
    pub taxable_income: Option<String>,
}

impl Income {
    /// Build the income block from the one figure actually read off the form
    pub fn from_salary_received(salary_received: Option<String>) -> Self {
        Self {
            gross_total_income: salary_received.clone(),
            taxable_income: salary_received.clone(),
            salary_received,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChapterViADeductions {
    pub total: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaxDetails {
    pub total_tax: Option<String>,
    pub surcharge: Option<String>,
    #[serde(rename = "rebate_under_section_87A")]
    pub rebate_under_section_87a: Option<String>,
    pub health_and_education_cess: Option<String>,
    pub relief_under_section_89: Option<String>,
    pub net_tax_payable: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Verification {
    pub place: Option<String>,
    pub date: Option<String>,
    pub verified_by: VerifiedBy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VerifiedBy {
    pub name: Option<String>,
    pub designation: Option<String>,
}

impl ExtractionResult {
    /// Number of leaf fields that carry a value (derived income copies excluded)
    pub fn populated_fields(&self) -> usize {
        let c = &self.certificate_details;
        let er = &self.employer_details;
        let ee = &self.employee_details;
        let s = &self.salary_details;
        let t = &self.tax_details;
        let v = &self.verification;

        [
            &c.certificate_no, &c.updated_on, &c.assessment_year,
            &er.name, &er.address, &er.contact, &er.email, &er.pan, &er.tan,
            &ee.name, &ee.address, &ee.pan,
            &ee.period_with_employer.from, &ee.period_with_employer.to,
            &s.gross_salary.total,
            &s.gross_salary.breakup.section_17_1, &s.gross_salary.breakup.profits_in_lieu,
            &s.deductions.under_section_16.standard_deduction,
            &s.deductions.under_section_16.entertainment_allowance,
            &s.deductions.under_section_16.tax_on_employment,
            &s.income.salary_received,
            &s.chapter_vi_a_deductions.total,
            &t.total_tax, &t.surcharge, &t.rebate_under_section_87a,
            &t.health_and_education_cess, &t.relief_under_section_89, &t.net_tax_payable,
            &v.place, &v.date, &v.verified_by.name, &v.verified_by.designation,
        ]
        .iter()
        .filter(|field| field.is_some())
        .count()
    }
}

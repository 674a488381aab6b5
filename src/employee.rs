use crate::error::Result;
use crate::salary::EmployeeSalary;

#[derive(Clone, Debug, PartialEq)]
pub struct Employee {
    pub id: u32,
    /// Star rating of the employing hotel, 3 to 5
    pub hotel_rating: u8,
    pub salary: f64,
    /// Seniority from 1 (junior) to 5 (executive)
    pub job_position: u8,
}

impl Employee {
    pub fn new(id: u32, hotel_rating: u8, salary: f64, job_position: u8) -> Self {
        Self {
            id,
            hotel_rating,
            salary,
            job_position,
        }
    }

    /// Replaces the salary with its adjusted value and returns it.
    ///
    /// The salary is left untouched on error.
    pub fn monthly_salary(&mut self, salaries: &EmployeeSalary) -> Result<f64> {
        self.salary = salaries.salary_calculator(self.job_position, self.hotel_rating, self.salary)?;

        Ok(self.salary)
    }
}

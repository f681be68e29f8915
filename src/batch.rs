//! 여러 (탱크, 보고 기간) 쌍을 일괄 계산한다.
//!
//! 각 쌍은 독립된 계산기와 캐시를 갖는다. 한 탱크가 실패해도 나머지는 계속 계산한다.

use log::error;

use crate::emissions::{calculate_total_emissions, EmissionResult};
use crate::error::TankCalculationError;
use crate::meteorology::ReportingChunk;
use crate::tank::TankGeometry;

#[derive(Debug, Default)]
pub struct BatchReport {
    pub results: Vec<EmissionResult>,
    pub failures: Vec<TankCalculationError>,
}

impl BatchReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 모든 쌍을 순서대로 계산한다. 결과 순서는 입력 순서를 따른다.
pub fn calculate_batch<'a, I>(pairs: I) -> BatchReport
where
    I: IntoIterator<Item = (&'a TankGeometry, &'a ReportingChunk)>,
{
    let mut report = BatchReport::default();
    for (tank, chunk) in pairs {
        match calculate_total_emissions(tank, chunk) {
            Ok(result) => report.results.push(result),
            Err(err) => {
                error!("{err}");
                report.failures.push(err);
            }
        }
    }
    report
}

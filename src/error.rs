//! 배출량 계산 오류 분류.
//!
//! 세 종류 모두 해당 (탱크, 기간) 계산에 치명적이며 부분 결과는 만들지 않는다.
//! 여러 탱크를 일괄 처리하는 쪽은 [`TankCalculationError`]로 탱크별 실패를 받아
//! 기록하고 다음 탱크로 넘어간다.

use thiserror::Error;

use crate::mixture::MakeupType;
use crate::quantity::UnitMismatch;

/// 식 분기가 정의되지 않은 입력을 만났을 때의 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalculationError {
    /// 조성 기준이 몰분율 계산을 지원하지 않음
    #[error("지원하지 않는 혼합물 조성 기준: {0:?}")]
    UnsupportedMakeupType(MakeupType),
    /// 식의 정의역을 벗어난 입력(0 나누기, 음수 제곱근 등)
    #[error("{step}: {detail}")]
    Domain { step: &'static str, detail: String },
    /// 보고 기간의 종료일이 시작일보다 앞섬
    #[error("보고 기간이 잘못됨: {start} ~ {end}")]
    InvalidPeriod {
        start: chrono::NaiveDate,
        end: chrono::NaiveDate,
    },
}

/// 배출량 계산 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EmissionsError {
    /// 선택된 식 분기에 필요한 형상/물질 입력이 없음
    #[error("{step}: 필수 입력 누락 ({field})")]
    MissingData {
        step: &'static str,
        field: &'static str,
    },
    #[error(transparent)]
    Calculation(#[from] CalculationError),
    #[error(transparent)]
    UnitMismatch(#[from] UnitMismatch),
}

impl EmissionsError {
    pub(crate) fn domain(step: &'static str, detail: impl Into<String>) -> Self {
        EmissionsError::Calculation(CalculationError::Domain {
            step,
            detail: detail.into(),
        })
    }

    pub(crate) fn missing(step: &'static str, field: &'static str) -> Self {
        EmissionsError::MissingData { step, field }
    }
}

/// 탱크 식별 정보가 붙은 계산 실패. 보고 계층이 탱크 단위로 표시한다.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("탱크 {tank_id} ({tank_name}) 계산 실패: {source}")]
pub struct TankCalculationError {
    pub tank_id: String,
    pub tank_name: String,
    #[source]
    pub source: EmissionsError,
}

/// Convenience type for `Result<T, EmissionsError>`.
pub type EmissionsResult<T> = Result<T, EmissionsError>;

/// 금액 계산 규칙
/// Money rounding rules
///
/// 게임 내 금액 단위:
/// - 현금, 총 자산, 손익: 정수 원 단위 (BIGINT)
/// - 가격, 평균 단가, 체결 금액: 소수점 2자리 (NUMERIC(12,2) / NUMERIC(15,2))
/// - 수익률: 소수점 2자리 (%)
///
/// 평가 값 반올림은 0에서 먼 쪽으로 (half away from zero) 처리합니다.
/// 예: 0.5 → 1, -0.5 → -1, 53333.333 → 53333.33
///
/// 현금 정산은 플레이어에게 유리하지 않은 쪽으로 자릅니다.
/// 매수 차감액은 올림, 매도 입금액은 내림.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 가격/단가 소수점 자리수
pub const PRICE_SCALE: u32 = 2;

/// 수익률 소수점 자리수
pub const RATE_SCALE: u32 = 2;

/// 정수 원 단위로 반올림
/// Round to whole currency units
pub fn round_units(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// 정수 원 단위로 반올림 후 i64 변환 (범위를 벗어나면 None)
/// Round to whole currency units and convert to i64
pub fn to_units(value: Decimal) -> Option<i64> {
    round_units(value).to_i64()
}

/// 정수 원 단위로 올림 (매수 차감액)
/// Round up to whole units, for debits
pub fn debit_units(value: Decimal) -> Option<i64> {
    value.round_dp_with_strategy(0, RoundingStrategy::ToPositiveInfinity).to_i64()
}

/// 정수 원 단위로 내림 (매도 입금액)
/// Round down to whole units, for credits
pub fn credit_units(value: Decimal) -> Option<i64> {
    value.round_dp_with_strategy(0, RoundingStrategy::ToNegativeInfinity).to_i64()
}

/// 가격 스케일(소수점 2자리)로 반올림
/// Round to price scale (2 decimal places)
pub fn round_price(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(PRICE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 수익률 스케일(소수점 2자리)로 반올림
pub fn round_rate(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(RATE_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// 비율(%) 계산: numerator / denominator × 100, 분모가 0이면 0
/// Percentage helper, returns zero when the denominator is zero
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    round_rate(numerator / denominator * Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_units_half_away_from_zero() {
        assert_eq!(round_units(Decimal::new(5, 1)), Decimal::from(1));
        assert_eq!(round_units(Decimal::new(-5, 1)), Decimal::from(-1));
        assert_eq!(round_units(Decimal::new(1004, 1)), Decimal::from(100));
        assert_eq!(to_units(Decimal::new(10505, 2)), Some(105));
    }

    #[test]
    fn test_settlement_never_favours_player() {
        let amount = Decimal::new(2_000_050, 2); // 20,000.50
        assert_eq!(debit_units(amount), Some(20_001));
        assert_eq!(credit_units(amount), Some(20_000));
        assert_eq!(debit_units(Decimal::from(500)), Some(500));
        assert_eq!(credit_units(Decimal::from(500)), Some(500));
    }

    #[test]
    fn test_round_price_two_places() {
        // 800000 / 15 = 53333.333...
        let avg = Decimal::from(800_000) / Decimal::from(15);
        assert_eq!(round_price(avg), Decimal::new(5333333, 2));
        assert_eq!(round_price(Decimal::new(1005, 3)), Decimal::new(101, 2));
    }

    #[test]
    fn test_percent_of_zero_denominator() {
        assert_eq!(percent_of(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            percent_of(Decimal::from(50_000), Decimal::from(1_000_000)),
            Decimal::new(500, 2)
        );
    }
}

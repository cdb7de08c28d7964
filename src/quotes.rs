/// Motivational quotes, one per week, in rotation order.
pub const QUOTES: [&str; 10] = [
    "천 리 길도 한 걸음부터. - 노자",
    "배우고 때때로 익히면 또한 기쁘지 아니한가. - 공자",
    "성공은 매일 반복한 작은 노력들의 합이다. - 로버트 콜리어",
    "오늘 할 수 있는 일에 전력을 다하라. 그러면 내일은 한 걸음 더 나아갈 것이다. - 아이작 뉴턴",
    "배움에는 왕도가 없다. - 유클리드",
    "멈추지 않는 한 얼마나 천천히 가는지는 중요하지 않다. - 공자",
    "지식에 대한 투자가 가장 높은 이자를 낳는다. - 벤저민 프랭클린",
    "천재는 1%의 영감과 99%의 노력으로 이루어진다. - 토머스 에디슨",
    "미래를 예측하는 가장 좋은 방법은 미래를 창조하는 것이다. - 피터 드러커",
    "우리가 반복적으로 하는 행동이 곧 우리 자신이다. - 아리스토텔레스",
];

pub fn weekly_quote(week: i64) -> &'static str {
    if week <= 0 {
        return QUOTES[0];
    }
    QUOTES[((week - 1) % QUOTES.len() as i64) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ten_weeks_follow_list_order() {
        for (i, quote) in QUOTES.iter().enumerate() {
            assert_eq!(weekly_quote(i as i64 + 1), *quote);
        }
    }

    #[test]
    fn cycles_after_ten_weeks() {
        assert_eq!(weekly_quote(11), weekly_quote(1));
        assert_eq!(weekly_quote(20), QUOTES[9]);
        assert_eq!(weekly_quote(27), QUOTES[6]);
    }

    #[test]
    fn non_positive_weeks_fall_back_to_first() {
        assert_eq!(weekly_quote(0), QUOTES[0]);
        assert_eq!(weekly_quote(-5), QUOTES[0]);
    }
}

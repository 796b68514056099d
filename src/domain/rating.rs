//! 评分聚合器

/// 计算一组评分的平均值
///
/// 空序列返回 `None`（"暂无评分"），不是错误。
pub fn average_rating(ratings: &[i32]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    Some(sum as f64 / ratings.len() as f64)
}

use crate::model::{BollingerBands, Macd, TechnicalIndicators, VolumeTrend};
use std::collections::HashMap;

pub const RSI_PERIOD: usize = 14;
pub const BOLLINGER_PERIOD: usize = 20;

pub struct TechnicalAnalyzer;

impl TechnicalAnalyzer {
    /// RSI over the first `period` price deltas. Uses a fixed initial-window
    /// mean of gains/losses, not Wilder smoothing. Returns `None` when fewer
    /// than `period + 1` prices are available.
    pub fn calculate_rsi(prices: &[f64], period: usize) -> Option<f64> {
        if period == 0 || prices.len() < period + 1 {
            return None;
        }

        let deltas: Vec<f64> = prices.windows(2).map(|w| w[1] - w[0]).collect();
        let gains: f64 = deltas[..period].iter().filter(|&&d| d > 0.0).sum();
        let losses: f64 = deltas[..period].iter().filter(|&&d| d < 0.0).map(|d| -d).sum();

        let avg_gain = gains / period as f64;
        let avg_loss = losses / period as f64;

        if avg_loss == 0.0 {
            return Some(100.0);
        }

        let rs = avg_gain / avg_loss;
        Some(100.0 - (100.0 / (1.0 + rs)))
    }

    /// Exponential moving average seeded with the first price and blended
    /// forward across the entire series.
    pub fn calculate_ema(prices: &[f64], period: usize) -> Option<f64> {
        let first = prices.first()?;
        let multiplier = 2.0 / (period as f64 + 1.0);

        let mut ema = *first;
        for price in &prices[1..] {
            ema = price * multiplier + ema * (1.0 - multiplier);
        }
        Some(ema)
    }

    /// Simple moving averages over the trailing 20/50/200 prices plus 12/26
    /// period EMAs, each entry present only when enough history exists.
    pub fn calculate_moving_averages(prices: &[f64]) -> HashMap<String, f64> {
        let mut result = HashMap::new();

        for (label, window) in [("sma_20", 20), ("sma_50", 50), ("sma_200", 200)] {
            if prices.len() >= window {
                let tail = &prices[prices.len() - window..];
                result.insert(label.to_string(), tail.iter().sum::<f64>() / window as f64);
            }
        }

        for (label, period) in [("ema_12", 12), ("ema_26", 26)] {
            if prices.len() >= period {
                if let Some(ema) = Self::calculate_ema(prices, period) {
                    result.insert(label.to_string(), ema);
                }
            }
        }

        result
    }

    /// MACD line from the whole-series 12/26 EMAs. The signal line is kept as
    /// the reference's 0.9 * MACD approximation.
    pub fn calculate_macd(prices: &[f64]) -> Option<Macd> {
        if prices.len() < 26 {
            return None;
        }

        let ema_12 = Self::calculate_ema(prices, 12)?;
        let ema_26 = Self::calculate_ema(prices, 26)?;

        let macd_line = ema_12 - ema_26;
        let signal_line = macd_line * 0.9;

        Some(Macd {
            macd: macd_line,
            signal: signal_line,
            histogram: macd_line - signal_line,
        })
    }

    /// Bollinger Bands at +/- 2 population standard deviations around the
    /// trailing `period` mean.
    pub fn calculate_bollinger_bands(prices: &[f64], period: usize) -> Option<BollingerBands> {
        if period == 0 || prices.len() < period {
            return None;
        }

        let tail = &prices[prices.len() - period..];
        let mean = tail.iter().sum::<f64>() / period as f64;
        let variance = tail.iter().map(|p| (p - mean).powi(2)).sum::<f64>() / period as f64;
        let std_dev = variance.sqrt();

        Some(BollingerBands {
            upper: mean + 2.0 * std_dev,
            middle: mean,
            lower: mean - 2.0 * std_dev,
        })
    }

    /// Compares the mean of the last 5 volumes against the mean of the 5
    /// before them. Needs at least 10 samples.
    pub fn analyze_volume_trend(volumes: &[u64]) -> VolumeTrend {
        if volumes.len() < 10 {
            return VolumeTrend::InsufficientData;
        }

        let n = volumes.len();
        let recent_avg = volumes[n - 5..].iter().sum::<u64>() as f64 / 5.0;
        let older_avg = volumes[n - 10..n - 5].iter().sum::<u64>() as f64 / 5.0;

        if recent_avg > older_avg * 1.2 {
            VolumeTrend::Increasing
        } else if recent_avg < older_avg * 0.8 {
            VolumeTrend::Decreasing
        } else {
            VolumeTrend::Stable
        }
    }

    /// All indicators in one pass. Pure over its inputs; safe to call
    /// concurrently for independent series.
    pub fn get_comprehensive_analysis(prices: &[f64], volumes: &[u64]) -> TechnicalIndicators {
        let moving_averages = Self::calculate_moving_averages(prices);

        TechnicalIndicators {
            rsi: Self::calculate_rsi(prices, RSI_PERIOD),
            macd: Self::calculate_macd(prices),
            moving_averages: if moving_averages.is_empty() {
                None
            } else {
                Some(moving_averages)
            },
            bollinger_bands: Self::calculate_bollinger_bands(prices, BOLLINGER_PERIOD),
            volume_trend: Self::analyze_volume_trend(volumes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn rsi_absent_below_minimum_window() {
        let prices = ascending(14);
        assert!(TechnicalAnalyzer::calculate_rsi(&prices, RSI_PERIOD).is_none());
    }

    #[test]
    fn rsi_is_100_when_all_deltas_gain() {
        let prices = ascending(15);
        let rsi = TechnicalAnalyzer::calculate_rsi(&prices, RSI_PERIOD).unwrap();
        assert_eq!(rsi, 100.0);
    }

    #[test]
    fn rsi_balanced_gains_and_losses_is_50() {
        // Alternating +1/-1 deltas: average gain equals average loss.
        let mut prices = vec![100.0];
        for i in 0..14 {
            let last = *prices.last().unwrap();
            prices.push(if i % 2 == 0 { last + 1.0 } else { last - 1.0 });
        }
        let rsi = TechnicalAnalyzer::calculate_rsi(&prices, RSI_PERIOD).unwrap();
        assert!((rsi - 50.0).abs() < 1e-9);
    }

    #[test]
    fn rsi_stays_in_bounds() {
        let prices = vec![
            145.0, 147.0, 146.0, 148.0, 150.0, 151.0, 149.0, 152.0, 150.0, 153.0, 152.0, 154.0,
            156.0, 155.0, 157.0, 159.0, 158.0, 160.0, 162.0, 161.0,
        ];
        let rsi = TechnicalAnalyzer::calculate_rsi(&prices, RSI_PERIOD).unwrap();
        assert!((0.0..=100.0).contains(&rsi));
    }

    #[test]
    fn ema_of_constant_series_is_the_constant() {
        let prices = vec![42.0; 30];
        let ema = TechnicalAnalyzer::calculate_ema(&prices, 12).unwrap();
        assert!((ema - 42.0).abs() < 1e-9);
    }

    #[test]
    fn moving_averages_respect_history_length() {
        let prices = ascending(30);
        let mas = TechnicalAnalyzer::calculate_moving_averages(&prices);
        assert!(mas.contains_key("sma_20"));
        assert!(mas.contains_key("ema_12"));
        assert!(mas.contains_key("ema_26"));
        assert!(!mas.contains_key("sma_50"));
        assert!(!mas.contains_key("sma_200"));

        // SMA of the last 20 of 100..129 is the mean of 110..129.
        let expected = (110..130).sum::<i32>() as f64 / 20.0;
        assert!((mas["sma_20"] - expected).abs() < 1e-9);
    }

    #[test]
    fn macd_absent_below_26_prices() {
        let prices = ascending(25);
        assert!(TechnicalAnalyzer::calculate_macd(&prices).is_none());
    }

    #[test]
    fn macd_signal_is_nine_tenths_of_macd_line() {
        let prices = ascending(40);
        let macd = TechnicalAnalyzer::calculate_macd(&prices).unwrap();
        assert!((macd.signal - macd.macd * 0.9).abs() < 1e-9);
        assert!((macd.histogram - (macd.macd - macd.signal)).abs() < 1e-9);
    }

    #[test]
    fn macd_zero_on_flat_series() {
        let prices = vec![50.0; 26];
        let macd = TechnicalAnalyzer::calculate_macd(&prices).unwrap();
        assert!(macd.macd.abs() < 1e-9);
        assert!(macd.signal.abs() < 1e-9);
        assert!(macd.histogram.abs() < 1e-9);
    }

    #[test]
    fn bollinger_absent_below_period() {
        let prices = ascending(19);
        assert!(TechnicalAnalyzer::calculate_bollinger_bands(&prices, BOLLINGER_PERIOD).is_none());
    }

    #[test]
    fn bollinger_collapses_on_flat_series() {
        let prices = vec![10.0; 20];
        let bands = TechnicalAnalyzer::calculate_bollinger_bands(&prices, BOLLINGER_PERIOD).unwrap();
        assert!((bands.upper - 10.0).abs() < 1e-9);
        assert!((bands.middle - 10.0).abs() < 1e-9);
        assert!((bands.lower - 10.0).abs() < 1e-9);
    }

    #[test]
    fn bollinger_uses_population_std_dev() {
        // Last 20 prices alternate 9/11: mean 10, population stddev 1.
        let prices: Vec<f64> = (0..20).map(|i| if i % 2 == 0 { 9.0 } else { 11.0 }).collect();
        let bands = TechnicalAnalyzer::calculate_bollinger_bands(&prices, BOLLINGER_PERIOD).unwrap();
        assert!((bands.middle - 10.0).abs() < 1e-9);
        assert!((bands.upper - 12.0).abs() < 1e-9);
        assert!((bands.lower - 8.0).abs() < 1e-9);
    }

    #[test]
    fn volume_trend_classification() {
        let increasing = [[50u64; 5].as_slice(), [100u64; 5].as_slice()].concat();
        assert_eq!(
            TechnicalAnalyzer::analyze_volume_trend(&increasing),
            VolumeTrend::Increasing
        );

        let decreasing = [[100u64; 5].as_slice(), [50u64; 5].as_slice()].concat();
        assert_eq!(
            TechnicalAnalyzer::analyze_volume_trend(&decreasing),
            VolumeTrend::Decreasing
        );

        assert_eq!(
            TechnicalAnalyzer::analyze_volume_trend(&[75u64; 10]),
            VolumeTrend::Stable
        );

        assert_eq!(
            TechnicalAnalyzer::analyze_volume_trend(&[75u64; 9]),
            VolumeTrend::InsufficientData
        );
    }

    #[test]
    fn comprehensive_analysis_marks_short_history_absent() {
        let prices = ascending(10);
        let volumes = vec![1_000u64; 8];
        let indicators = TechnicalAnalyzer::get_comprehensive_analysis(&prices, &volumes);

        assert!(indicators.rsi.is_none());
        assert!(indicators.macd.is_none());
        assert!(indicators.bollinger_bands.is_none());
        assert!(indicators.moving_averages.is_none());
        assert_eq!(indicators.volume_trend, VolumeTrend::InsufficientData);
    }
}

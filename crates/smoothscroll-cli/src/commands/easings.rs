use anyhow::Result;

use smoothscroll_core::EasingType;

const SAMPLES: [f64; 5] = [0.0, 0.25, 0.5, 0.75, 1.0];

pub fn run() -> Result<()> {
    println!(
        "{:<12} {}",
        "EASING",
        SAMPLES
            .iter()
            .map(|t| format!("{:>7}", format!("t={}", t)))
            .collect::<String>()
    );
    println!("{}", "-".repeat(12 + 1 + SAMPLES.len() * 7));

    for easing in EasingType::ALL {
        println!("{:<12} {}", easing.name(), sample_row(easing));
    }

    Ok(())
}

fn sample_row(easing: EasingType) -> String {
    SAMPLES
        .iter()
        .map(|t| format!("{:>7.3}", easing.apply(*t)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_row() {
        assert_eq!(
            sample_row(EasingType::Linear),
            "  0.000  0.250  0.500  0.750  1.000"
        );
    }
}

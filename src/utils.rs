use std::fmt;
use std::time::Instant;

/// A simple timer based on std::time::Instant, to implement the std::fmt::Display trait on
pub struct Timer {
    time: Instant,
}

impl Timer {
    pub fn start() -> Self {
        Timer { time: Instant::now() }
    }
}

impl fmt::Display for Timer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:>68} {:>8.2} s",
            "elapsed time:",
            self.time.elapsed().as_secs_f32()
        )
    }
}

/// Group a list into consecutive n-tuples. Incomplete tuples are discarded, e.g.
/// group([0, 3, 4, 10, 2, 3], 2) => [[0, 3], [4, 10], [2, 3]]
pub fn group(lst: &[f64], n: usize) -> Vec<Vec<f64>> {
    if n == 0 {
        return Vec::new();
    }
    lst.chunks_exact(n).map(|chunk| chunk.to_vec()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grouping() {
        let lst: Vec<f64> = (0..10).map(|x| x as f64).collect();
        assert_eq!(
            group(&lst, 3),
            vec![vec![0.0, 1.0, 2.0], vec![3.0, 4.0, 5.0], vec![6.0, 7.0, 8.0]]
        );
        assert_eq!(group(&[0.0, 3.0, 4.0, 10.0], 2), vec![vec![0.0, 3.0], vec![4.0, 10.0]]);
        assert!(group(&lst, 0).is_empty());
    }

    #[test]
    fn timer_display() {
        let timer: Timer = Timer::start();
        assert!(timer.to_string().contains("elapsed time:"));
    }
}

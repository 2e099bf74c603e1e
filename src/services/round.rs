use std::io::{self, Write};
use std::sync::Arc;
use std::time::Duration;
use log::{debug, warn};
use crate::error::Result;
use crate::services::dictionary::DictionaryIndex;
use crate::services::generator::Draw;
use crate::services::solver::{solve, Solution};

/// Think-time progress bar, `|====      |`, one `=` per tick
#[derive(Debug, Clone, Copy)]
pub struct Countdown {
    pub ticks: usize,
    pub duration: Duration,
}

impl Countdown {
    pub fn new(ticks: usize, duration: Duration) -> Self {
        Self { ticks, duration }
    }

    /// Time between two ticks, at least one millisecond
    pub fn period(&self) -> Duration {
        let ticks = u32::try_from(self.ticks).unwrap_or(u32::MAX).max(1);
        (self.duration / ticks).max(Duration::from_millis(1))
    }

    pub async fn run<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.ticks == 0 {
            tokio::time::sleep(self.duration).await;
            return Ok(());
        }

        let mut interval = tokio::time::interval(self.period());
        // The first tick completes immediately
        interval.tick().await;

        for done in 1..=self.ticks {
            interval.tick().await;
            write!(out, "\r|{}{}|", "=".repeat(done), " ".repeat(self.ticks - done))?;
            out.flush()?;
        }
        writeln!(out)
    }
}

/// Start `job` on the blocking pool, run the countdown, then join the job.
/// The job starts with the countdown; neither waits on or cancels the other.
pub async fn run_alongside<T, F, W>(countdown: &Countdown, out: &mut W, job: F) -> T
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
    W: Write,
{
    let handle = tokio::task::spawn_blocking(job);

    if let Err(e) = countdown.run(out).await {
        warn!("Countdown display failed: {}", e);
    }

    match handle.await {
        Ok(result) => result,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

/// Run one round: the solve runs during the player's think-time
pub async fn play_round<W: Write>(
    index: Arc<DictionaryIndex>,
    draw: &Draw,
    countdown: &Countdown,
    out: &mut W,
) -> Result<Solution> {
    let solver_draw = draw.clone();
    let solution = run_alongside(countdown, out, move || solve(&solver_draw, &index)).await?;
    debug!("Round over for {}: best length {}", draw, solution.best_length);
    Ok(solution)
}

/// Reveal a solution to the player
pub fn write_solution<W: Write>(out: &mut W, solution: &Solution) -> io::Result<()> {
    if solution.is_found() {
        writeln!(out, "Best words found of: {} letters", solution.best_length)?;
        for word in &solution.best_words {
            writeln!(out, "{}", word.to_uppercase())?;
        }
    } else {
        writeln!(out, " No acceptable word has been found...")?;
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MotError;
    use std::sync::mpsc;

    fn index() -> Arc<DictionaryIndex> {
        Arc::new(DictionaryIndex::from_words(["cat", "act", "cats"]))
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_renders_every_tick() {
        let mut out = Vec::new();
        Countdown::new(4, Duration::from_secs(2)).run(&mut out).await.unwrap();
        let rendered = String::from_utf8(out).unwrap();
        assert!(rendered.starts_with("\r|=   |"));
        assert!(rendered.ends_with("\r|====|\n"));
        assert_eq!(rendered.matches('\r').count(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_countdown_takes_the_think_time() {
        let start = tokio::time::Instant::now();
        Countdown::new(10, Duration::from_secs(30)).run(&mut io::sink()).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(30));
    }

    #[tokio::test]
    async fn test_play_round_returns_solution() {
        let mut out = Vec::new();
        let countdown = Countdown::new(3, Duration::from_millis(30));
        let solution = play_round(index(), &Draw::from("tscaa"), &countdown, &mut out).await.unwrap();

        assert_eq!(solution.best_length, 4);
        assert_eq!(solution.best_words, ["cats"]);
        assert!(String::from_utf8(out).unwrap().contains("|===|"));
    }

    #[tokio::test]
    async fn test_play_round_surfaces_invalid_draw() {
        let countdown = Countdown::new(0, Duration::from_millis(1));
        let result = play_round(index(), &Draw::from("c4t"), &countdown, &mut io::sink()).await;
        assert!(matches!(result, Err(MotError::InvalidDraw { .. })));
    }

    #[tokio::test]
    async fn test_concurrent_rounds_share_the_index() {
        let index = index();
        let countdown = Countdown::new(0, Duration::from_millis(5));
        let mut sink_a = io::sink();
        let mut sink_b = io::sink();
        let draw_a = Draw::from("tac");
        let draw_b = Draw::from("cta");
        let (a, b) = tokio::join!(
            play_round(index.clone(), &draw_a, &countdown, &mut sink_a),
            play_round(index.clone(), &draw_b, &countdown, &mut sink_b),
        );
        assert_eq!(a.unwrap(), b.unwrap());
    }

    #[test]
    fn test_write_solution() {
        let found = crate::services::solver::solve(&Draw::from("tac"), &index()).unwrap();
        let mut out = Vec::new();
        write_solution(&mut out, &found).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Best words found of: 3 letters\nCAT\nACT\n\n");

        let missing = crate::services::solver::solve(&Draw::from("zz"), &index()).unwrap();
        let mut out = Vec::new();
        write_solution(&mut out, &missing).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("No acceptable word"));
    }

    #[test]
    fn test_period_never_divides_by_zero() {
        let countdown = Countdown::new(u32::MAX as usize + 1, Duration::from_secs(30));
        assert_eq!(countdown.period(), Duration::from_millis(1));
        assert_eq!(Countdown::new(30, Duration::from_secs(30)).period(), Duration::from_secs(1));
    }

    /// Sink that records whether the job had started by the time the
    /// countdown drew its bar
    struct StartWatcher {
        started: mpsc::Receiver<()>,
        seen: bool,
    }

    impl Write for StartWatcher {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if !self.seen {
                self.seen = self.started.recv_timeout(Duration::from_secs(2)).is_ok();
            }
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_runs_during_countdown() {
        let (tx, rx) = mpsc::channel();
        let mut watcher = StartWatcher { started: rx, seen: false };
        let countdown = Countdown::new(2, Duration::from_secs(30));

        let answer = run_alongside(&countdown, &mut watcher, move || {
            tx.send(()).unwrap();
            42
        })
        .await;

        assert_eq!(answer, 42);
        assert!(watcher.seen, "job had not started while the countdown ran");
    }
}

use super::*;

/// Rejection sampling over random cells: candidates in the safe zone or already mined are drawn
/// again. There is no attempt cap, [`check_mine_count`] guarantees enough free cells exist.
#[derive(Debug)]
pub struct RandomMineGenerator<'a> {
    rng: &'a mut Lcg,
    mine_count: CellCount,
}

impl<'a> RandomMineGenerator<'a> {
    pub fn new(rng: &'a mut Lcg, mine_count: CellCount) -> Result<Self> {
        let mine_count = check_mine_count(mine_count)?;
        Ok(Self { rng, mine_count })
    }
}

impl MineGenerator for RandomMineGenerator<'_> {
    fn generate(self, board: &mut Board, center: Coord2) {
        const SLOW_DRAWS: u32 = 100_000;

        let zone = SafeZone::new(center);
        board.clear_mines();

        let mut draws: u32 = 0;
        let mut rejected: u32 = 0;
        for _ in 0..self.mine_count {
            loop {
                let candidate = self.rng.random_cell();
                draws += 1;
                if draws == SLOW_DRAWS {
                    log::warn!(
                        "Mine placement still running after {} draws, {} of {} placed",
                        draws,
                        board.mine_count(),
                        self.mine_count
                    );
                }

                if zone.contains(candidate) || !board.plant_mine(candidate) {
                    rejected += 1;
                    continue;
                }
                log::trace!("Planted mine at {:?}", candidate);
                break;
            }
        }

        log::debug!(
            "Generated {} mines around {:?}, {} draws rejected",
            board.mine_count(),
            center,
            rejected
        );
    }
}

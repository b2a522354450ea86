use derive_more::Display;
use ndarray::{Array2, Array3};
use snafu::ensure;

use ctt_sat_core::lit::Lit;

use crate::error::*;
use crate::problem::Problem;

/// What a variable stands for; indices are positions in the instance lists.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum VarKey {
    /// Course `c` is taught in slot `h`.
    #[display(fmt = "CH[c={}, h={}]", _0, _1)]
    Ch(usize, usize),
    /// Course `c` has a lecture on day `d`.
    #[display(fmt = "CD[c={}, d={}]", _0, _1)]
    Cd(usize, usize),
    /// Course `c` uses room `r`.
    #[display(fmt = "CR[c={}, r={}]", _0, _1)]
    Cr(usize, usize),
    /// Curriculum `k` has a lecture in slot `h`.
    #[display(fmt = "KH[k={}, h={}]", _0, _1)]
    Kh(usize, usize),
    /// Course `c` is taught in slot `h` in room `r`.
    #[display(fmt = "CHR[c={}, h={}, r={}]", _0, _1, _2)]
    Chr(usize, usize, usize),
    #[display(fmt = "AUX")]
    Aux,
}

/// Append-only variable allocator: id `i` stands for `keys[i - 1]`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct VarPool {
    keys: Vec<VarKey>,
}

impl VarPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// High-water mark: the largest id handed out so far.
    pub fn num_vars(&self) -> usize {
        self.keys.len()
    }

    /// Panics once ids leave the literal range.
    pub fn alloc(&mut self, key: VarKey) -> Lit {
        self.keys.push(key);
        Lit::from_var(self.keys.len())
    }

    pub fn new_aux(&mut self) -> Lit {
        self.alloc(VarKey::Aux)
    }

    /// Reverse lookup of the variable behind `lit`.
    pub fn key(&self, lit: Lit) -> Option<VarKey> {
        self.keys.get(lit.var() as usize - 1).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Lit, VarKey)> + '_ {
        self.keys
            .iter()
            .enumerate()
            .map(|(i, &key)| (Lit::from_var(i + 1), key))
    }
}

/// Dense variable families of one encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vars {
    /// `[course, slot]`
    pub ch: Array2<Lit>,
    /// `[course, day]`
    pub cd: Array2<Lit>,
    /// `[course, room]`
    pub cr: Array2<Lit>,
    /// `[curriculum, slot]`
    pub kh: Array2<Lit>,
    /// `[course, slot, room]`, only for the room-slot model.
    pub chr: Option<Array3<Lit>>,
}

fn alloc_block<F>(pool: &mut VarPool, (n, m): (usize, usize), key: F) -> Array2<Lit>
where
    F: Fn(usize, usize) -> VarKey,
{
    let base = pool.num_vars();
    for i in 0..n {
        for j in 0..m {
            pool.alloc(key(i, j));
        }
    }
    Array2::from_shape_fn((n, m), |(i, j)| Lit::from_var(base + i * m + j + 1))
}

impl Vars {
    /// Number of problem variables for `problem`, or `None` on overflow.
    pub fn count(problem: &Problem, room_slots: bool) -> Option<u128> {
        let courses = problem.num_courses() as u128;
        let days = problem.num_days() as u128;
        let slots = days.checked_mul(problem.instance.periods_per_day as u128)?;
        let rooms = problem.num_rooms() as u128;
        let curricula = problem.num_curricula() as u128;

        let mut total = courses.checked_mul(slots)?;
        total = total.checked_add(courses.checked_mul(days)?)?;
        total = total.checked_add(courses.checked_mul(rooms)?)?;
        total = total.checked_add(curricula.checked_mul(slots)?)?;
        if room_slots {
            total = total.checked_add(courses.checked_mul(slots)?.checked_mul(rooms)?)?;
        }
        Some(total)
    }

    /// Allocates CH, CD, CR, KH and, if asked, CHR, each family row-major.
    pub fn allocate(pool: &mut VarPool, problem: &Problem, room_slots: bool) -> Result<Self> {
        let limit = i32::MAX as u128;
        let required = Vars::count(problem, room_slots)
            .and_then(|n| n.checked_add(pool.num_vars() as u128))
            .unwrap_or(u128::MAX);
        ensure!(required <= limit, TooManyVariablesSnafu { required });

        let courses = problem.num_courses();
        let slots = problem.total_slots();
        let days = problem.num_days();
        let rooms = problem.num_rooms();

        let ch = alloc_block(pool, (courses, slots), VarKey::Ch);
        let cd = alloc_block(pool, (courses, days), VarKey::Cd);
        let cr = alloc_block(pool, (courses, rooms), VarKey::Cr);
        let kh = alloc_block(pool, (problem.num_curricula(), slots), VarKey::Kh);
        let chr = if room_slots {
            let base = pool.num_vars();
            for c in 0..courses {
                for h in 0..slots {
                    for r in 0..rooms {
                        pool.alloc(VarKey::Chr(c, h, r));
                    }
                }
            }
            Some(Array3::from_shape_fn((courses, slots, rooms), |(c, h, r)| {
                Lit::from_var(base + (c * slots + h) * rooms + r + 1)
            }))
        } else {
            None
        };

        Ok(Self { ch, cd, cr, kh, chr })
    }

    /// Checked lookup of a problem variable.
    pub fn id(&self, key: VarKey) -> Option<Lit> {
        match key {
            VarKey::Ch(c, h) => self.ch.get((c, h)).copied(),
            VarKey::Cd(c, d) => self.cd.get((c, d)).copied(),
            VarKey::Cr(c, r) => self.cr.get((c, r)).copied(),
            VarKey::Kh(k, h) => self.kh.get((k, h)).copied(),
            VarKey::Chr(c, h, r) => self.chr.as_ref().and_then(|chr| chr.get((c, h, r)).copied()),
            VarKey::Aux => None,
        }
    }

    /// Like [`Vars::id`], but a missing variable is a bug in the caller.
    pub fn get(&self, key: VarKey) -> Lit {
        match self.id(key) {
            Some(lit) => lit,
            None => panic!("no variable allocated for {}", key),
        }
    }

    pub fn has_room_slots(&self) -> bool {
        self.chr.is_some()
    }
}

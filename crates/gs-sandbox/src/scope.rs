//! The host functions a guest module may import.
//!
//! | Module   | Functions                                                           |
//! |----------|---------------------------------------------------------------------|
//! | `agent`  | `x`, `y`, `energy` (f64), `width`, `height`, `vision`,              |
//! |          | `food_count`, `food_x(i)`, `food_y(i)`,                             |
//! |          | `obstacle_count`, `obstacle_x(i)`, `obstacle_y(i)`                  |
//! | `math`   | `abs`, `sign`, `min`, `max`, `clamp(v, lo, hi)`, `manhattan(x1, y1, x2, y2)` |
//! | `random` | `int(lo, hi)` inclusive, `chance(percent)` → 0 or 1                 |
//!
//! Indexed accessors return `-1` for an out-of-range index.  Everything is
//! read-only except the RNG stream, which is private to the call.

use gs_behavior::Perception;
use gs_core::{Cell, SimRng};
use wasmtime::{Caller, Engine, Linker, StoreLimits};

/// Every `(module, name)` pair [`link`] defines.  Validation rejects any
/// other import.
pub const HOST_FUNCTIONS: &[(&str, &str)] = &[
    ("agent", "x"),
    ("agent", "y"),
    ("agent", "energy"),
    ("agent", "width"),
    ("agent", "height"),
    ("agent", "vision"),
    ("agent", "food_count"),
    ("agent", "food_x"),
    ("agent", "food_y"),
    ("agent", "obstacle_count"),
    ("agent", "obstacle_x"),
    ("agent", "obstacle_y"),
    ("math", "abs"),
    ("math", "sign"),
    ("math", "min"),
    ("math", "max"),
    ("math", "clamp"),
    ("math", "manhattan"),
    ("random", "int"),
    ("random", "chance"),
];

pub fn is_host_function(module: &str, name: &str) -> bool {
    HOST_FUNCTIONS.iter().any(|&(m, n)| m == module && n == name)
}

/// Store data for one `decide` call.
pub(crate) struct HostState {
    pub perception: Perception,
    pub rng:        SimRng,
    pub limits:     StoreLimits,
}

type Ctx<'a> = Caller<'a, HostState>;

fn count(cells: &[Cell]) -> i32 {
    i32::try_from(cells.len()).unwrap_or(i32::MAX)
}

fn nth(cells: &[Cell], index: i32, coord: fn(Cell) -> i32) -> i32 {
    usize::try_from(index)
        .ok()
        .and_then(|i| cells.get(i))
        .map_or(-1, |&c| coord(c))
}

fn x_of(c: Cell) -> i32 {
    c.x
}

fn y_of(c: Cell) -> i32 {
    c.y
}

/// Build the linker holding every entry of [`HOST_FUNCTIONS`].
pub(crate) fn link(engine: &Engine) -> wasmtime::Result<Linker<HostState>> {
    let mut linker = Linker::new(engine);

    // ── agent ────────────────────────────────────────────────────────────────
    linker.func_wrap("agent", "x", |c: Ctx<'_>| c.data().perception.position.x)?;
    linker.func_wrap("agent", "y", |c: Ctx<'_>| c.data().perception.position.y)?;
    linker.func_wrap("agent", "energy", |c: Ctx<'_>| c.data().perception.energy)?;
    linker.func_wrap("agent", "width", |c: Ctx<'_>| c.data().perception.width)?;
    linker.func_wrap("agent", "height", |c: Ctx<'_>| c.data().perception.height)?;
    linker.func_wrap("agent", "vision", |c: Ctx<'_>| {
        i32::try_from(c.data().perception.vision_radius).unwrap_or(i32::MAX)
    })?;
    linker.func_wrap("agent", "food_count", |c: Ctx<'_>| count(&c.data().perception.food))?;
    linker.func_wrap("agent", "food_x", |c: Ctx<'_>, i: i32| nth(&c.data().perception.food, i, x_of))?;
    linker.func_wrap("agent", "food_y", |c: Ctx<'_>, i: i32| nth(&c.data().perception.food, i, y_of))?;
    linker.func_wrap("agent", "obstacle_count", |c: Ctx<'_>| count(&c.data().perception.obstacles))?;
    linker.func_wrap("agent", "obstacle_x", |c: Ctx<'_>, i: i32| {
        nth(&c.data().perception.obstacles, i, x_of)
    })?;
    linker.func_wrap("agent", "obstacle_y", |c: Ctx<'_>, i: i32| {
        nth(&c.data().perception.obstacles, i, y_of)
    })?;

    // ── math ─────────────────────────────────────────────────────────────────
    linker.func_wrap("math", "abs", |v: i32| v.saturating_abs())?;
    linker.func_wrap("math", "sign", |v: i32| v.signum())?;
    linker.func_wrap("math", "min", |a: i32, b: i32| a.min(b))?;
    linker.func_wrap("math", "max", |a: i32, b: i32| a.max(b))?;
    // `max` then `min` so inverted bounds never panic.
    linker.func_wrap("math", "clamp", |v: i32, lo: i32, hi: i32| v.max(lo).min(hi))?;
    linker.func_wrap("math", "manhattan", |x1: i32, y1: i32, x2: i32, y2: i32| {
        let d = x1.abs_diff(x2).saturating_add(y1.abs_diff(y2));
        i32::try_from(d).unwrap_or(i32::MAX)
    })?;

    // ── random ───────────────────────────────────────────────────────────────
    linker.func_wrap("random", "int", |mut c: Ctx<'_>, lo: i32, hi: i32| {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        c.data_mut().rng.gen_range(lo..=hi)
    })?;
    linker.func_wrap("random", "chance", |mut c: Ctx<'_>, percent: i32| {
        i32::from(c.data_mut().rng.gen_bool(f64::from(percent) / 100.0))
    })?;

    Ok(linker)
}

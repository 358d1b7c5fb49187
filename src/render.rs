use std::io::{self, BufRead, Write};

/// One sampled curve together with its optional color hint.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    /// Accepted points, in sampling order.
    pub points: Vec<(f64, f64)>,
    /// Color name given with `with color`, passed through unchecked.
    pub color:  Option<String>,
}

impl Curve {
    #[must_use]
    pub const fn new(points: Vec<(f64, f64)>, color: Option<String>) -> Self {
        Self { points, color }
    }

    /// Smallest and largest x and y coordinate, or `None` for an empty curve.
    #[must_use]
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let (&(x, y), rest) = self.points.split_first()?;
        Some(rest.iter()
                 .fold(((x, x), (y, y)), |((x_min, x_max), (y_min, y_max)), &(x, y)| {
                     ((x_min.min(x), x_max.max(x)), (y_min.min(y), y_max.max(y)))
                 }))
    }
}

/// The surface curves are handed to.
///
/// The interpreter never draws by itself. Each sampled curve is forwarded as
/// soon as it exists, and `show` receives every curve accumulated since the
/// last `clear`.
pub trait Renderer {
    /// Adds a curve to the surface.
    ///
    /// # Errors
    /// Any I/O failure of the underlying surface.
    fn draw_curve(&mut self, curve: &Curve) -> io::Result<()>;

    /// Presents the surface and returns once the viewer is dismissed.
    ///
    /// # Errors
    /// Any I/O failure of the underlying surface.
    fn show(&mut self, curves: &[Curve]) -> io::Result<()>;

    /// Removes every curve from the surface.
    ///
    /// # Errors
    /// Any I/O failure of the underlying surface.
    fn clear(&mut self) -> io::Result<()>;
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    fn draw_curve(&mut self, curve: &Curve) -> io::Result<()> {
        (**self).draw_curve(curve)
    }

    fn show(&mut self, curves: &[Curve]) -> io::Result<()> {
        (**self).show(curves)
    }

    fn clear(&mut self) -> io::Result<()> {
        (**self).clear()
    }
}

/// A request received by a [`Recorder`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    Draw(Curve),
    /// `show`, with the number of curves that were presented.
    Show(usize),
    Clear,
}

/// A renderer that keeps every request in memory.
///
/// Used for headless runs and to inspect what a program produced.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    /// Every request, in the order it arrived.
    pub calls: Vec<RenderCall>,
}

impl Recorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Curves drawn since the most recent `clear`.
    #[must_use]
    pub fn curves(&self) -> Vec<&Curve> {
        let start = self.calls
                        .iter()
                        .rposition(|call| matches!(call, RenderCall::Clear))
                        .map_or(0, |index| index + 1);
        self.calls[start..].iter()
                           .filter_map(|call| match call {
                               RenderCall::Draw(curve) => Some(curve),
                               _ => None,
                           })
                           .collect()
    }
}

impl Renderer for Recorder {
    fn draw_curve(&mut self, curve: &Curve) -> io::Result<()> {
        self.calls.push(RenderCall::Draw(curve.clone()));
        Ok(())
    }

    fn show(&mut self, curves: &[Curve]) -> io::Result<()> {
        self.calls.push(RenderCall::Show(curves.len()));
        Ok(())
    }

    fn clear(&mut self) -> io::Result<()> {
        self.calls.push(RenderCall::Clear);
        Ok(())
    }
}

/// A renderer that describes curves as text.
///
/// Every drawn curve is summarized by its point count, its bounds and its
/// color. `show` lists the curves on the surface and, when `wait` is set,
/// blocks until a line is read from standard input.
pub struct ConsoleRenderer<W: Write> {
    out:    W,
    wait:   bool,
    points: bool,
    drawn:  usize,
}

impl<W: Write> ConsoleRenderer<W> {
    #[must_use]
    pub const fn new(out: W, wait: bool, points: bool) -> Self {
        Self { out,
               wait,
               points,
               drawn: 0 }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn describe(&mut self, number: usize, curve: &Curve) -> io::Result<()> {
        let color = curve.color.as_deref().unwrap_or("auto");
        match curve.bounds() {
            Some(((x_min, x_max), (y_min, y_max))) => {
                writeln!(self.out,
                         "curve {number}: {} point(s), x in [{x_min}, {x_max}], y in [{y_min}, {y_max}], color {color}",
                         curve.points.len())
            },
            None => writeln!(self.out, "curve {number}: no points, color {color}"),
        }
    }
}

impl<W: Write> Renderer for ConsoleRenderer<W> {
    fn draw_curve(&mut self, curve: &Curve) -> io::Result<()> {
        self.drawn += 1;
        self.describe(self.drawn, curve)?;
        if self.points {
            for (x, y) in &curve.points {
                writeln!(self.out, "  ({x}, {y})")?;
            }
        }
        Ok(())
    }

    fn show(&mut self, curves: &[Curve]) -> io::Result<()> {
        writeln!(self.out, "showing {} curve(s)", curves.len())?;
        for (index, curve) in curves.iter().enumerate() {
            self.describe(index + 1, curve)?;
        }

        if self.wait {
            write!(self.out, "Press Enter to continue...")?;
            self.out.flush()?;
            let mut line = String::new();
            io::stdin().lock().read_line(&mut line)?;
        }
        self.out.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        self.drawn = 0;
        writeln!(self.out, "cleared")
    }
}

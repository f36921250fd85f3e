use snake_engine::{RenderProvider, Vector3, World};

const WALL: char = '#';
const EMPTY: char = ' ';
const FOOD: char = '*';
const BODY: char = 'o';
const HEAD: char = '@';

pub struct AsciiRenderer {
    columns: usize,
    rows: usize,
    quiet: bool,
    last_frame: String,
    frames_drawn: u64,
}

impl AsciiRenderer {
    pub fn new(quiet: bool) -> Self {
        Self {
            columns: 42,
            rows: 22,
            quiet,
            last_frame: String::new(),
            frames_drawn: 0,
        }
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    #[cfg(test)]
    fn last_frame(&self) -> &str {
        &self.last_frame
    }

    fn cell(&self, world: &World, position: &Vector3) -> (usize, usize) {
        let terrain = world.terrain();
        let inner_columns = self.columns - 2;
        let inner_rows = self.rows - 2;
        let u = ((position.x + terrain.half_width()) / terrain.width()).clamp(0.0, 1.0);
        let v = ((position.z + terrain.half_height()) / terrain.height()).clamp(0.0, 1.0);
        let column = 1 + ((u * inner_columns as f64) as usize).min(inner_columns - 1);
        let row = 1 + ((v * inner_rows as f64) as usize).min(inner_rows - 1);
        (column, row)
    }

    fn draw(&self, world: &World) -> String {
        let mut grid = vec![vec![EMPTY; self.columns]; self.rows];
        for (row, line) in grid.iter_mut().enumerate() {
            for (column, cell) in line.iter_mut().enumerate() {
                if row == 0 || row == self.rows - 1 || column == 0 || column == self.columns - 1 {
                    *cell = WALL;
                }
            }
        }

        let (column, row) = self.cell(world, &world.food().position());
        grid[row][column] = FOOD;

        let positions = world.snake().positions();
        for (i, position) in positions.iter().enumerate().rev() {
            let (column, row) = self.cell(world, position);
            grid[row][column] = if i == 0 { HEAD } else { BODY };
        }

        let mut frame = String::with_capacity((self.columns + 1) * self.rows);
        for line in grid {
            frame.extend(line);
            frame.push('\n');
        }
        frame
    }
}

impl RenderProvider for AsciiRenderer {
    fn render(&mut self, world: &World) {
        let frame = self.draw(world);
        if frame == self.last_frame {
            return;
        }
        if !self.quiet {
            print!("\x1B[2J\x1B[H{}", frame);
        }
        self.last_frame = frame;
        self.frames_drawn += 1;
    }

    fn resize(&mut self, width: u32, height: u32) {
        // Anything smaller cannot hold a border around at least one cell.
        self.columns = (width as usize).max(3);
        self.rows = (height as usize).max(3);
        self.last_frame.clear();
    }
}

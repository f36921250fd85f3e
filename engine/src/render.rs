use crate::world::World;

pub trait RenderProvider {
    fn render(&mut self, world: &World);

    fn resize(&mut self, width: u32, height: u32);
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct NullRenderer {
    pub frames: u64,
    pub last_segment_count: usize,
    pub viewport: (u32, u32),
}

impl RenderProvider for NullRenderer {
    fn render(&mut self, world: &World) {
        self.frames += 1;
        self.last_segment_count = world.snake().len();
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}

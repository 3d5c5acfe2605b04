use once_cell::sync::Lazy;

/// The total number of block types in the map.
pub const BLOCK_COUNT: usize = 256;

/// An RGBA color, 8 bits per channel.
pub type Color = [u8; 4];

/// Maps block types to the colors their pixels are blended from.
pub struct ColorMap {
    colors: Vec<Color>,
}

impl ColorMap {
    pub fn new(colors: Vec<Color>) -> ColorMap {
        ColorMap { colors }
    }

    /// The built-in block color table. Block types without an assigned
    /// color are fully transparent black.
    pub fn hardcoded() -> &'static ColorMap {
        static HARDCODED: Lazy<ColorMap> = Lazy::new(|| {
            let mut colors = vec![[0, 0, 0, 0]; BLOCK_COUNT];

            // air
            colors[0] = [255, 255, 255, 0];
            // stone
            colors[1] = [120, 120, 120, 255];
            // grass
            colors[2] = [117, 176, 73, 255];
            // dirt
            colors[3] = [134, 96, 67, 255];
            // cobblestone
            colors[4] = [115, 115, 115, 255];
            colors[48] = [115, 115, 115, 255];
            // planks
            colors[5] = [157, 128, 79, 255];
            // sapling
            colors[6] = [120, 120, 120, 0];
            // bedrock
            colors[7] = [84, 84, 84, 255];
            // water
            colors[8] = [38, 92, 255, 128];
            colors[9] = [38, 92, 255, 128];
            // lava
            colors[10] = [255, 90, 0, 255];
            colors[11] = [255, 90, 0, 255];
            // sand
            colors[12] = [218, 210, 158, 255];
            // gravel
            colors[13] = [136, 126, 126, 255];
            // ores
            colors[14] = [143, 140, 125, 255];
            colors[15] = [136, 130, 127, 255];
            colors[16] = [115, 115, 115, 255];
            // log
            colors[17] = [102, 81, 51, 255];
            // leaves
            colors[18] = [60, 192, 41, 100];
            // glass
            colors[20] = [255, 255, 255, 64];
            // wool
            colors[35] = [222, 222, 222, 255];
            // flowers
            colors[37] = [255, 0, 0, 255];
            colors[38] = [255, 255, 0, 0];
            // gold, iron, slabs, bricks, tnt
            colors[41] = [232, 245, 46, 255];
            colors[42] = [191, 191, 191, 255];
            colors[43] = [200, 200, 200, 255];
            colors[44] = [200, 200, 200, 255];
            colors[45] = [170, 86, 62, 255];
            colors[46] = [160, 83, 65, 255];
            // obsidian
            colors[49] = [26, 11, 43, 255];
            // torch, fire
            colors[50] = [245, 220, 50, 200];
            colors[51] = [255, 170, 30, 200];
            // stairs, chest
            colors[53] = [157, 128, 79, 255];
            colors[54] = [125, 91, 38, 255];
            // diamond
            colors[56] = [129, 140, 143, 255];
            colors[57] = [45, 166, 152, 255];
            // workbench, crops, farmland
            colors[58] = [114, 88, 56, 255];
            colors[59] = [146, 192, 0, 255];
            colors[60] = [95, 58, 30, 255];
            // furnace
            colors[61] = [96, 96, 96, 255];
            colors[62] = [96, 96, 96, 255];
            // sign, door
            colors[63] = [111, 91, 54, 255];
            colors[64] = [136, 109, 67, 255];
            // ladder, rails
            colors[65] = [181, 140, 64, 32];
            colors[66] = [150, 134, 102, 180];
            // stone stairs
            colors[67] = [115, 115, 115, 255];
            // iron door
            colors[71] = [191, 191, 191, 255];
            // redstone ore
            colors[73] = [131, 107, 107, 255];
            colors[74] = [131, 107, 107, 255];
            // redstone torch
            colors[75] = [181, 140, 64, 32];
            colors[76] = [255, 0, 0, 200];
            // snow
            colors[78] = [255, 255, 255, 255];
            // ice
            colors[79] = [83, 113, 163, 51];
            // snow block
            colors[80] = [250, 250, 250, 255];
            // cactus
            colors[81] = [25, 120, 25, 255];
            // clay
            colors[82] = [151, 157, 169, 255];
            // sugar cane
            colors[83] = [193, 234, 150, 255];
            // fences
            colors[84] = [134, 96, 67, 255];
            colors[85] = [134, 96, 67, 255];

            ColorMap::new(colors)
        });
        &HARDCODED
    }

    pub fn get(&self, block_type: u16) -> Option<Color> {
        self.colors.get(block_type as usize).copied()
    }

    /// Copies the color for a block into a pixel, leaving it untouched for
    /// an unknown block type.
    pub fn write(&self, destination: &mut Color, block_type: u16) {
        if let Some(color) = self.get(block_type) {
            *destination = color;
        }
    }
}

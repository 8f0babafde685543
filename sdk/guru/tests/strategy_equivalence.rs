use guru::{
    AssetStore, Config, Console, MAX_SPRITES, MmioRegisters, MotionPoint, ShadowSprites, SpriteCount, SpriteRecord,
    Transfer, VirtualRegisters,
    surface::{SPRITE_BLOCK_WORDS, TILE_WINDOW_WORDS},
};
use proptest::prelude::*;

const PAIRS: usize = 1024;

/// Leaked word buffers standing in for the four register regions.
struct Regions {
    sprites: &'static mut [u16],
    scroll_x: &'static mut [u16],
    control: &'static mut [u16],
    tiles: &'static mut [u16],
}

impl Regions {
    fn leak() -> Self {
        let region = |len| Box::leak(vec![0u16; len].into_boxed_slice());
        Self {
            sprites: region(SPRITE_BLOCK_WORDS),
            scroll_x: region(1),
            control: region(1),
            tiles: region(TILE_WINDOW_WORDS),
        }
    }

    fn mmio(&mut self) -> MmioRegisters {
        unsafe {
            MmioRegisters::from_addresses(
                self.sprites.as_mut_ptr() as usize,
                self.scroll_x.as_mut_ptr() as usize,
                self.control.as_mut_ptr() as usize,
                self.tiles.as_mut_ptr() as usize,
            )
        }
    }

    fn snapshot(&self) -> Vec<u16> {
        [&*self.sprites, &*self.scroll_x, &*self.control, &*self.tiles]
            .iter()
            .flat_map(|region| region.iter().map(|word| unsafe { core::ptr::read_volatile(word) }))
            .collect()
    }
}

fn sprite_records(count: usize) -> impl Strategy<Value = Vec<SpriteRecord>> {
    prop::collection::vec(any::<[u16; 4]>(), count)
        .prop_map(|words| words.iter().map(|w| SpriteRecord::from_words(w)).collect())
}

fn motion_table() -> impl Strategy<Value = Vec<MotionPoint>> {
    prop::collection::vec(any::<(u16, u16)>(), PAIRS)
        .prop_map(|pairs| pairs.into_iter().map(|(x, y)| MotionPoint::new(x, y)).collect())
}

fn tile_table() -> impl Strategy<Value = Vec<u16>> {
    (1usize..=8).prop_flat_map(|strips| prop::collection::vec(256u16..512, strips * 32))
}

proptest! {
    #[test]
    fn both_refreshes_sample_every_third_pair(
        motion in motion_table(),
        sprites in 1usize..=MAX_SPRITES,
        wrap in 0usize..=PAIRS / 2,
    ) {
        let count = SpriteCount::new(sprites).unwrap();

        for transfer in [Transfer::Bulk, Transfer::Recordwise] {
            let mut shadow = ShadowSprites::new(count);
            shadow.refresh(&motion, wrap, transfer);

            prop_assert_eq!(shadow.len(), sprites);
            for (i, record) in shadow.as_slice().iter().enumerate() {
                let point = motion[wrap + 3 * i];
                prop_assert_eq!(
                    *record,
                    SpriteRecord { x: point.x, y: point.y, ..SpriteRecord::INITIAL },
                    "{:?} sprite {}", transfer, i
                );
            }
        }
    }

    #[test]
    fn strategies_leave_identical_registers(
        motion in motion_table(),
        tiles in tile_table(),
        sprites in 1usize..=MAX_SPRITES,
        frames in 1usize..80,
    ) {
        let assets = AssetStore::new(motion, tiles).unwrap();

        let run = |composite: Transfer, refresh: Transfer| {
            let config = Config {
                sprite_count: SpriteCount::new(sprites).unwrap(),
                composite_transfer: composite,
                refresh_transfer: refresh,
                ..Config::default()
            };
            let mut console = Console::new(assets.clone(), &config).unwrap();
            let mut regs = VirtualRegisters::new();
            for _ in 0..frames {
                console.composite(&mut regs);
                console.advance();
            }
            regs
        };

        let bulk = run(Transfer::Bulk, Transfer::Bulk);
        prop_assert_eq!(bulk.writes().while_enabled, 0);
        prop_assert_eq!(&bulk, &run(Transfer::Recordwise, Transfer::Recordwise));
        prop_assert_eq!(&bulk, &run(Transfer::Bulk, Transfer::Recordwise));
        prop_assert_eq!(&bulk, &run(Transfer::Recordwise, Transfer::Bulk));
    }

    #[test]
    fn tile_strips_land_in_one_column(
        strip in prop::collection::vec(any::<u16>(), 32),
        column in 0usize..64,
    ) {
        let mut bulk = VirtualRegisters::new();
        let mut recordwise = VirtualRegisters::new();
        Transfer::Bulk.copy_tile_strip(&mut bulk, &strip, column);
        Transfer::Recordwise.copy_tile_strip(&mut recordwise, &strip, column);

        prop_assert_eq!(&bulk, &recordwise);
        for (row, &cell) in strip.iter().enumerate() {
            prop_assert_eq!(bulk.tile(row, column), cell);
        }
    }
}

proptest! {
    #[test]
    fn mmio_bulk_writes_match_per_cell_writes(
        records in (1usize..=MAX_SPRITES).prop_flat_map(sprite_records),
        strip in prop::collection::vec(any::<u16>(), 32),
        column in 0usize..64,
    ) {
        let mut bulk = Regions::leak();
        let mut recordwise = Regions::leak();

        for (regions, transfer) in [(&mut bulk, Transfer::Bulk), (&mut recordwise, Transfer::Recordwise)] {
            let mut regs = regions.mmio();
            transfer.copy_sprites(&mut regs, &records);
            transfer.copy_tile_strip(&mut regs, &strip, column);
        }

        prop_assert_eq!(bulk.snapshot(), recordwise.snapshot());
        for (row, &cell) in strip.iter().enumerate() {
            prop_assert_eq!(bulk.tiles[column + 64 * row], cell);
        }
        for (slot, record) in records.iter().enumerate() {
            prop_assert_eq!(SpriteRecord::from_words(&bulk.sprites[slot * 4..][..4]), *record);
        }
    }
}

#[test]
fn sprite_block_matches_per_slot_writes() {
    let records: Vec<SpriteRecord> = (0..MAX_SPRITES as u16)
        .map(|i| SpriteRecord { x: i, y: 1000 - i, ..SpriteRecord::INITIAL })
        .collect();

    let mut block = VirtualRegisters::new();
    Transfer::Bulk.copy_sprites(&mut block, &records);
    let mut slots = VirtualRegisters::new();
    Transfer::Recordwise.copy_sprites(&mut slots, &records);

    assert_eq!(block, slots);
    assert_eq!(block.sprite(127), SpriteRecord { x: 127, y: 873, attr1: 0x0101, attr2: 0x0003 });
}

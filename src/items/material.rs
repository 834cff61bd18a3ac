//! Material registry
//!
//! The finite set of item type identifiers the engine understands, along with
//! the intrinsic facts the host attaches to each type: default stack size,
//! durability, container-ness and consumable-ness.

use serde::{Deserialize, Serialize};

/// Namespace prefix accepted (and ignored) when parsing type names
const NAMESPACE_PREFIX: &str = "minecraft:";

/// Item type identifier
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Material {
    // Blocks and raw materials
    Stone,
    Cobblestone,
    Dirt,
    Sand,
    Gravel,
    Glass,
    OakLog,
    OakPlanks,
    Torch,
    Stick,
    Coal,
    IronIngot,
    GoldIngot,
    Diamond,
    Emerald,
    Redstone,
    Wheat,
    Arrow,
    Bread,
    Apple,
    GoldenApple,

    // Sixteen-stackers
    EnderPearl,
    Snowball,
    Egg,
    Bucket,
    HoneyBottle,
    OakSign,
    WhiteBanner,

    // Single-use consumables
    GlassBottle,
    ExperienceBottle,
    WaterBucket,
    LavaBucket,
    MilkBucket,
    PowderSnowBucket,
    AxolotlBucket,
    TadpoleBucket,
    PufferfishBucket,
    SalmonBucket,
    CodBucket,
    TropicalFishBucket,
    MushroomStew,
    RabbitStew,
    BeetrootSoup,
    SuspiciousStew,
    Potion,
    SplashPotion,
    LingeringPotion,

    // Other unstackables
    Saddle,
    TotemOfUndying,
    EnchantedBook,
    Cake,

    // Tools
    WoodenSword,
    WoodenPickaxe,
    WoodenAxe,
    WoodenShovel,
    WoodenHoe,
    StoneSword,
    StonePickaxe,
    StoneAxe,
    StoneShovel,
    StoneHoe,
    IronSword,
    IronPickaxe,
    IronAxe,
    IronShovel,
    IronHoe,
    GoldenSword,
    GoldenPickaxe,
    GoldenAxe,
    GoldenShovel,
    GoldenHoe,
    DiamondSword,
    DiamondPickaxe,
    DiamondAxe,
    DiamondShovel,
    DiamondHoe,
    NetheriteSword,
    NetheritePickaxe,
    NetheriteAxe,
    NetheriteShovel,
    NetheriteHoe,
    FlintAndSteel,
    Shears,
    FishingRod,
    CarrotOnAStick,
    WarpedFungusOnAStick,
    Bow,
    Crossbow,
    Trident,
    Shield,
    Elytra,

    // Armor
    TurtleHelmet,
    IronHelmet,
    IronChestplate,
    IronLeggings,
    IronBoots,
    DiamondHelmet,
    DiamondChestplate,
    DiamondLeggings,
    DiamondBoots,

    // Container blocks
    Chest,
    TrappedChest,
    EnderChest,
    Barrel,
    Hopper,
    Dropper,
    Dispenser,
    Furnace,
    BlastFurnace,
    Smoker,
    BrewingStand,
    CraftingTable,
    EnchantingTable,
    Anvil,
    ChippedAnvil,
    DamagedAnvil,
    Grindstone,
    CartographyTable,
    Loom,
    SmithingTable,
    Stonecutter,
    Beacon,
    Lectern,
    Composter,
    Jukebox,

    // Shulker boxes
    ShulkerBox,
    WhiteShulkerBox,
    OrangeShulkerBox,
    MagentaShulkerBox,
    LightBlueShulkerBox,
    YellowShulkerBox,
    LimeShulkerBox,
    PinkShulkerBox,
    GrayShulkerBox,
    LightGrayShulkerBox,
    CyanShulkerBox,
    PurpleShulkerBox,
    BlueShulkerBox,
    BrownShulkerBox,
    GreenShulkerBox,
    RedShulkerBox,
    BlackShulkerBox,
}

/// Tool families, used to decide which clicks count as using a tool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolFamily {
    Pickaxe,
    Axe,
    Shovel,
    Hoe,
    Sword,
}

impl Material {
    /// Number of slots in a container item's interior
    pub const CONTAINER_SLOTS: usize = 27;

    /// Parse a type name the way a config file or command line writes it.
    ///
    /// Case-insensitive, accepts a `minecraft:` prefix, and treats spaces and
    /// dashes as underscores.
    pub fn match_name(name: &str) -> Option<Material> {
        let trimmed = name.trim();
        let bare = match trimmed.get(..NAMESPACE_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(NAMESPACE_PREFIX) => {
                &trimmed[NAMESPACE_PREFIX.len()..]
            }
            _ => trimmed,
        };
        let normalized: String = bare
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        normalized.parse().ok()
    }

    /// Canonical identifier
    pub fn name(&self) -> &'static str {
        (*self).into()
    }

    /// Intrinsic default stack capacity
    pub fn max_stack_size(&self) -> u32 {
        use Material::*;

        if self.is_damageable() || self.is_container() {
            return 1;
        }

        match self {
            EnderPearl | Snowball | Egg | Bucket | HoneyBottle | OakSign | WhiteBanner => 16,
            WaterBucket | LavaBucket | MilkBucket | PowderSnowBucket | AxolotlBucket
            | TadpoleBucket | PufferfishBucket | SalmonBucket | CodBucket
            | TropicalFishBucket | MushroomStew | RabbitStew | BeetrootSoup
            | SuspiciousStew | Potion | SplashPotion | LingeringPotion | Saddle
            | TotemOfUndying | EnchantedBook | Cake => 1,
            _ => 64,
        }
    }

    /// Maximum durability; zero for types without per-use state
    pub fn max_durability(&self) -> u32 {
        use Material::*;

        match self {
            WoodenSword | WoodenPickaxe | WoodenAxe | WoodenShovel | WoodenHoe => 59,
            StoneSword | StonePickaxe | StoneAxe | StoneShovel | StoneHoe => 131,
            IronSword | IronPickaxe | IronAxe | IronShovel | IronHoe => 250,
            GoldenSword | GoldenPickaxe | GoldenAxe | GoldenShovel | GoldenHoe => 32,
            DiamondSword | DiamondPickaxe | DiamondAxe | DiamondShovel | DiamondHoe => 1561,
            NetheriteSword | NetheritePickaxe | NetheriteAxe | NetheriteShovel
            | NetheriteHoe => 2031,
            FlintAndSteel => 64,
            Shears => 238,
            FishingRod => 64,
            CarrotOnAStick => 25,
            WarpedFungusOnAStick => 100,
            Bow => 384,
            Crossbow => 465,
            Trident => 250,
            Shield => 336,
            Elytra => 432,
            TurtleHelmet => 275,
            IronHelmet => 165,
            IronChestplate => 240,
            IronLeggings => 225,
            IronBoots => 195,
            DiamondHelmet => 363,
            DiamondChestplate => 528,
            DiamondLeggings => 495,
            DiamondBoots => 429,
            _ => 0,
        }
    }

    /// Whether this type carries per-use state (durability)
    pub fn is_damageable(&self) -> bool {
        self.max_durability() > 0
    }

    /// Whether items of this type hold nested contents
    pub fn is_container(&self) -> bool {
        self.as_ref().contains("SHULKER_BOX")
    }

    /// Whether this type is a single-use consumable that must not be used
    /// out of a merged stack
    pub fn is_consumable(&self) -> bool {
        use Material::*;

        let name = self.as_ref();
        if name.contains("BUCKET") && *self != Bucket {
            return true;
        }
        if name.contains("SOUP") || name.contains("STEW") || name.contains("POTION") {
            return true;
        }
        matches!(self, GlassBottle | HoneyBottle | ExperienceBottle)
    }

    /// Whether right-clicking a placed block of this type opens a container UI
    pub fn opens_container(&self) -> bool {
        use Material::*;

        if self.is_container() {
            return true;
        }
        matches!(
            self,
            Chest
                | TrappedChest
                | EnderChest
                | Barrel
                | Hopper
                | Dropper
                | Dispenser
                | Furnace
                | BlastFurnace
                | Smoker
                | BrewingStand
                | CraftingTable
                | EnchantingTable
                | Anvil
                | ChippedAnvil
                | DamagedAnvil
                | Grindstone
                | CartographyTable
                | Loom
                | SmithingTable
                | Stonecutter
                | Beacon
                | Lectern
                | Composter
                | Jukebox
        )
    }

    /// Tool family, derived from the type name suffix
    pub fn tool_family(&self) -> Option<ToolFamily> {
        let name = self.as_ref();
        if name.ends_with("_PICKAXE") {
            Some(ToolFamily::Pickaxe)
        } else if name.ends_with("_AXE") {
            Some(ToolFamily::Axe)
        } else if name.ends_with("_SHOVEL") {
            Some(ToolFamily::Shovel)
        } else if name.ends_with("_HOE") {
            Some(ToolFamily::Hoe)
        } else if name.ends_with("_SWORD") {
            Some(ToolFamily::Sword)
        } else {
            None
        }
    }

    /// Whether a right click with this item spends durability
    /// (tilling, stripping, path making, lighting, shearing, casting, steering)
    pub fn uses_durability_on_right_click(&self) -> bool {
        use Material::*;

        matches!(
            self.tool_family(),
            Some(ToolFamily::Hoe | ToolFamily::Axe | ToolFamily::Shovel)
        ) || matches!(
            self,
            FlintAndSteel | Shears | FishingRod | CarrotOnAStick | WarpedFungusOnAStick
        )
    }

    /// Whether a left click with this item spends durability
    pub fn uses_durability_on_left_click(&self) -> bool {
        self.tool_family().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_match_name_variants() {
        assert_eq!(Material::match_name("DIAMOND"), Some(Material::Diamond));
        assert_eq!(Material::match_name("diamond"), Some(Material::Diamond));
        assert_eq!(Material::match_name("minecraft:iron_sword"), Some(Material::IronSword));
        assert_eq!(Material::match_name(" white shulker box "), Some(Material::WhiteShulkerBox));
        assert_eq!(Material::match_name("NOT_A_THING"), None);
    }

    #[test]
    fn test_match_name_multibyte() {
        assert_eq!(Material::match_name("aéééééx"), None);
        assert_eq!(Material::match_name("minecraftéegg"), None);
        assert_eq!(Material::match_name("ééééé"), None);
        assert_eq!(Material::match_name("MINECRAFT:egg"), Some(Material::Egg));
    }

    #[test]
    fn test_display_round_trips() {
        for material in Material::iter() {
            assert_eq!(Material::match_name(&material.to_string()), Some(material));
        }
    }

    #[test]
    fn test_intrinsic_capacities() {
        assert_eq!(Material::Diamond.max_stack_size(), 64);
        assert_eq!(Material::EnderPearl.max_stack_size(), 16);
        assert_eq!(Material::IronSword.max_stack_size(), 1);
        assert_eq!(Material::Potion.max_stack_size(), 1);
        assert_eq!(Material::RedShulkerBox.max_stack_size(), 1);
    }

    #[test]
    fn test_classification() {
        assert!(Material::DiamondPickaxe.is_damageable());
        assert!(!Material::Diamond.is_damageable());
        assert!(Material::ShulkerBox.is_container());
        assert!(Material::BlueShulkerBox.is_container());
        assert!(!Material::Chest.is_container());
        assert!(Material::Chest.opens_container());
        assert!(Material::WaterBucket.is_consumable());
        assert!(!Material::Bucket.is_consumable());
        assert!(Material::SplashPotion.is_consumable());
        assert!(Material::MushroomStew.is_consumable());
    }

    #[test]
    fn test_tool_families() {
        assert_eq!(Material::IronPickaxe.tool_family(), Some(ToolFamily::Pickaxe));
        assert_eq!(Material::IronAxe.tool_family(), Some(ToolFamily::Axe));
        assert_eq!(Material::Shears.tool_family(), None);
        assert!(Material::Shears.uses_durability_on_right_click());
        assert!(!Material::IronSword.uses_durability_on_right_click());
        assert!(Material::IronSword.uses_durability_on_left_click());
    }
}

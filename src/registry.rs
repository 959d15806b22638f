//! Static registries for fuel types and prefectures.
//!
//! Both enumerations are closed: the declaration order is the canonical display
//! order (table columns, legend entries, selectors). Region listings shown to
//! users are sorted with Greek collation instead, see [`Region::locale_order`].

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Display metadata attached to each fuel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FuelTypeMeta {
    pub name: &'static str,
    pub label: &'static str,
    /// Chart color as `#RRGGBB`.
    pub color: &'static str,
    pub default_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuelType {
    #[serde(rename = "UNLEADED_95")]
    Unleaded95,
    #[serde(rename = "UNLEADED_100")]
    Unleaded100,
    #[serde(rename = "SUPER")]
    Super,
    #[serde(rename = "DIESEL")]
    Diesel,
    #[serde(rename = "DIESEL_HEATING")]
    DieselHeating,
    #[serde(rename = "GAS")]
    Gas,
}

// Colors follow the Microsoft Office chart palette.
const FUEL_TYPES: [FuelTypeMeta; 6] = [
    FuelTypeMeta {
        name: "UNLEADED_95",
        label: "Αμόλυβδη 95",
        color: "#4472C4",
        default_visible: true,
    },
    FuelTypeMeta {
        name: "UNLEADED_100",
        label: "Αμόλυβδη 100",
        color: "#ED7D31",
        default_visible: true,
    },
    FuelTypeMeta {
        name: "SUPER",
        label: "Super",
        color: "#A5A5A5",
        default_visible: false,
    },
    FuelTypeMeta {
        name: "DIESEL",
        label: "Diesel",
        color: "#FFC000",
        default_visible: true,
    },
    FuelTypeMeta {
        name: "DIESEL_HEATING",
        label: "Diesel Θέρμανσης",
        color: "#5B9BD5",
        default_visible: false,
    },
    FuelTypeMeta {
        name: "GAS",
        label: "Υγραέριο",
        color: "#70AD47",
        default_visible: true,
    },
];

impl FuelType {
    /// All fuel types in canonical display order.
    pub const ALL: [FuelType; 6] = [
        FuelType::Unleaded95,
        FuelType::Unleaded100,
        FuelType::Super,
        FuelType::Diesel,
        FuelType::DieselHeating,
        FuelType::Gas,
    ];

    pub fn ordered_ids() -> &'static [FuelType] {
        &Self::ALL
    }

    pub fn meta(self) -> &'static FuelTypeMeta {
        &FUEL_TYPES[self as usize]
    }

    /// Canonical identifier, e.g. `DIESEL_HEATING`.
    pub fn name(self) -> &'static str {
        self.meta().name
    }

    pub fn label(self) -> &'static str {
        self.meta().label
    }

    pub fn color(self) -> &'static str {
        self.meta().color
    }

    pub fn is_default_visible(self) -> bool {
        self.meta().default_visible
    }

    /// Parse the color as an `(r, g, b)` triple.
    pub fn rgb(self) -> (u8, u8, u8) {
        let hex = self.color().trim_start_matches('#');
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        (channel(0), channel(2), channel(4))
    }
}

impl FromStr for FuelType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        FuelType::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| Error::UnknownFuelType(s.to_string()))
    }
}

impl fmt::Display for FuelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Greek prefectures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Region {
    Attica,
    AetoliaAcarnania,
    Argolis,
    Arkadias,
    Arta,
    Achaea,
    Boeotia,
    Grevena,
    Drama,
    Dodecanese,
    Evros,
    Euboea,
    Evrytania,
    Zakynthos,
    Elis,
    Imathia,
    Heraklion,
    Thesprotia,
    Thessaloniki,
    Ioannina,
    Kavala,
    Karditsa,
    Kastoria,
    Kerkyra,
    Cephalonia,
    Kilkis,
    Kozani,
    Corinthia,
    Cyclades,
    Laconia,
    Larissa,
    Lasithi,
    Lesbos,
    Lefkada,
    Magnesia,
    Messenia,
    Xanthi,
    Pella,
    Pieria,
    Preveza,
    Rethymno,
    Rhodope,
    Samos,
    Serres,
    Trikala,
    Phthiotis,
    Florina,
    Phocis,
    Chalkidiki,
    Chania,
    Chios,
}

// (variant, identifier, label); must follow the declaration order of `Region`.
const REGIONS: [(Region, &str, &str); 51] = [
    (Region::Attica, "ATTICA", "ΑΤΤΙΚΗΣ"),
    (Region::AetoliaAcarnania, "AETOLIA_ACARNANIA", "ΑΙΤΩΛΙΑΣ ΚΑΙ ΑΚΑΡΝΑΝΙΑΣ"),
    (Region::Argolis, "ARGOLIS", "ΑΡΓΟΛΙΔΟΣ"),
    (Region::Arkadias, "ARKADIAS", "ΑΡΚΑΔΙΑΣ"),
    (Region::Arta, "ARTA", "ΑΡΤΗΣ"),
    (Region::Achaea, "ACHAEA", "ΑΧΑΪΑΣ"),
    (Region::Boeotia, "BOEOTIA", "ΒΟΙΩΤΙΑΣ"),
    (Region::Grevena, "GREVENA", "ΓΡΕΒΕΝΩΝ"),
    (Region::Drama, "DRAMA", "ΔΡΑΜΑΣ"),
    (Region::Dodecanese, "DODECANESE", "ΔΩΔΕΚΑΝΗΣΟΥ"),
    (Region::Evros, "EVROS", "ΕΒΡΟΥ"),
    (Region::Euboea, "EUBOEA", "ΕΥΒΟΙΑΣ"),
    (Region::Evrytania, "EVRYTANIA", "ΕΥΡΥΤΑΝΙΑΣ"),
    (Region::Zakynthos, "ZAKYNTHOS", "ΖΑΚΥΝΘΟΥ"),
    (Region::Elis, "ELIS", "ΗΛΕΙΑΣ"),
    (Region::Imathia, "IMATHIA", "ΗΜΑΘΙΑΣ"),
    (Region::Heraklion, "HERAKLION", "ΗΡΑΚΛΕΙΟΥ"),
    (Region::Thesprotia, "THESPROTIA", "ΘΕΣΠΡΩΤΙΑΣ"),
    (Region::Thessaloniki, "THESSALONIKI", "ΘΕΣΣΑΛΟΝΙΚΗΣ"),
    (Region::Ioannina, "IOANNINA", "ΙΩΑΝΝΙΝΩΝ"),
    (Region::Kavala, "KAVALA", "ΚΑΒΑΛΑΣ"),
    (Region::Karditsa, "KARDITSA", "ΚΑΡΔΙΤΣΗΣ"),
    (Region::Kastoria, "KASTORIA", "ΚΑΣΤΟΡΙΑΣ"),
    (Region::Kerkyra, "KERKYRA", "ΚΕΡΚΥΡΑΣ"),
    (Region::Cephalonia, "CEPHALONIA", "ΚΕΦΑΛΛΗΝΙΑΣ"),
    (Region::Kilkis, "KILKIS", "ΚΙΛΚΙΣ"),
    (Region::Kozani, "KOZANI", "ΚΟΖΑΝΗΣ"),
    (Region::Corinthia, "CORINTHIA", "ΚΟΡΙΝΘΙΑΣ"),
    (Region::Cyclades, "CYCLADES", "ΚΥΚΛΑΔΩΝ"),
    (Region::Laconia, "LACONIA", "ΛΑΚΩΝΙΑΣ"),
    (Region::Larissa, "LARISSA", "ΛΑΡΙΣΗΣ"),
    (Region::Lasithi, "LASITHI", "ΛΑΣΙΘΙΟΥ"),
    (Region::Lesbos, "LESBOS", "ΛΕΣΒΟΥ"),
    (Region::Lefkada, "LEFKADA", "ΛΕΥΚΑΔΟΣ"),
    (Region::Magnesia, "MAGNESIA", "ΜΑΓΝΗΣΙΑΣ"),
    (Region::Messenia, "MESSENIA", "ΜΕΣΣΗΝΙΑΣ"),
    (Region::Xanthi, "XANTHI", "ΞΑΝΘΗΣ"),
    (Region::Pella, "PELLA", "ΠΕΛΛΗΣ"),
    (Region::Pieria, "PIERIA", "ΠΙΕΡΙΑΣ"),
    (Region::Preveza, "PREVEZA", "ΠΡΕΒΕΖΗΣ"),
    (Region::Rethymno, "RETHYMNO", "ΡΕΘΥΜΝΗΣ"),
    (Region::Rhodope, "RHODOPE", "ΡΟΔΟΠΗΣ"),
    (Region::Samos, "SAMOS", "ΣΑΜΟΥ"),
    (Region::Serres, "SERRES", "ΣΕΡΡΩΝ"),
    (Region::Trikala, "TRIKALA", "ΤΡΙΚΑΛΩΝ"),
    (Region::Phthiotis, "PHTHIOTIS", "ΦΘΙΩΤΙΔΟΣ"),
    (Region::Florina, "FLORINA", "ΦΛΩΡΙΝΗΣ"),
    (Region::Phocis, "PHOCIS", "ΦΩΚΙΔΟΣ"),
    (Region::Chalkidiki, "CHALKIDIKI", "ΧΑΛΚΙΔΙΚΗΣ"),
    (Region::Chania, "CHANIA", "ΧΑΝΙΩΝ"),
    (Region::Chios, "CHIOS", "ΧΙΟΥ"),
];

impl Region {
    /// All regions in declaration order.
    pub const ALL: [Region; 51] = {
        let mut out = [Region::Attica; 51];
        let mut i = 0;
        while i < REGIONS.len() {
            out[i] = REGIONS[i].0;
            i += 1;
        }
        out
    };

    pub fn ordered_ids() -> &'static [Region] {
        &Self::ALL
    }

    pub fn name(self) -> &'static str {
        REGIONS[self as usize].1
    }

    pub fn label(self) -> &'static str {
        REGIONS[self as usize].2
    }

    /// All regions sorted by label with Greek collation.
    pub fn locale_order() -> Vec<Region> {
        sort_by_label(Region::ALL)
    }
}

impl FromStr for Region {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        REGIONS
            .iter()
            .find(|(_, name, _)| *name == s)
            .map(|(r, _, _)| *r)
            .ok_or_else(|| Error::UnknownRegion(s.to_string()))
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Primary-strength collation key for Greek text: accents and diaeresis are
/// dropped, letters are upper-cased (final sigma folds to `Σ`). Unicode lays out
/// the Greek capitals in alphabetical order, so comparing keys by code point
/// gives the Greek alphabetical order.
pub fn collation_key(label: &str) -> String {
    label
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_uppercase)
        .collect()
}

/// Total order on regions by label, ties broken by identifier.
pub fn compare_labels(a: Region, b: Region) -> Ordering {
    collation_key(a.label())
        .cmp(&collation_key(b.label()))
        .then_with(|| a.name().cmp(b.name()))
}

/// Sort any set of regions into locale order.
pub fn sort_by_label(regions: impl IntoIterator<Item = Region>) -> Vec<Region> {
    let mut keyed: Vec<(String, Region)> = regions
        .into_iter()
        .map(|r| (collation_key(r.label()), r))
        .collect();
    keyed.sort_by(|(ka, a), (kb, b)| ka.cmp(kb).then_with(|| a.name().cmp(b.name())));
    keyed.into_iter().map(|(_, r)| r).collect()
}

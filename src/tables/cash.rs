//! Cash treasure prices

/// First index of the price list
pub const FIRST_INDEX: i32 = 7;

/// Cash treasure by index, starting at index 7 and ending at 162
#[rustfmt::skip]
pub const CASH_PRICES: [&str; 156] = [
    "35G", "40G", "40G", "40G", "45G", "45G", "45G", "50G", "50G", "50G",
    "55G", "55G", "60G", "60G", "65G", "70G", "70G", "75G", "75G", "80G",
    "85G", "85G", "90G", "95G", "100G", "100G", "105G", "110G", "115G", "120G",
    "125G", "130G", "135G", "140G", "145G", "150G", "155G", "160G", "165G", "170G",
    "175G", "180G", "185G", "195G", "200G", "205G", "210G", "220G", "225G", "230G",
    "240G", "245G", "255G", "260G", "265G", "275G", "280G", "290G", "300G", "300G",
    "310G", "320G", "330G", "340G", "340G", "350G", "360G", "370G", "380G", "390G",
    "400G", "410G", "420G", "430G", "440G", "450G", "460G", "460G", "480G", "490G",
    "500G", "510G", "520G", "530G", "540G", "550G", "560G", "570G", "580G", "590G",
    "610G", "620G", "630G", "640G", "650G", "660G", "680G", "690G", "700G", "710G",
    "730G", "740G", "750G", "760G", "780G", "790G", "800G", "820G", "830G", "840G",
    "860G", "870G", "890G", "900G", "910G", "930G", "940G", "960G", "970G", "990G",
    "1000G", "1020G", "1030G", "1050G", "1060G", "1080G", "1090G", "1110G", "1130G", "1140G",
    "1160G", "1170G", "1190G", "1210G", "1220G", "1240G", "1260G", "1270G", "1290G", "1310G",
    "1330G", "1340G", "1360G", "1380G", "1400G", "1410G", "1430G", "1450G", "1470G", "1490G",
    "1500G", "1520G", "1540G", "1560G", "1580G", "1600G",
];

/// Price for an index in 7..=162
pub fn price(index: i32) -> Option<&'static str> {
    let offset = usize::try_from(index - FIRST_INDEX).ok()?;
    CASH_PRICES.get(offset).copied()
}

/// All prices with their indices
pub fn entries() -> impl Iterator<Item = (i32, &'static str)> {
    CASH_PRICES
        .iter()
        .enumerate()
        .map(|(i, price)| (FIRST_INDEX + i as i32, *price))
}

//! Small in-memory dataset shared by unit tests.

use crate::trivia_engine::data::{ReferenceData, Source, SourceRecord};

type Row = (&'static str, &'static str, &'static str, &'static [&'static str], Option<&'static str>);

/// (country, minor region, capital, languages, dish string)
const ROWS: &[Row] = &[
    ("France",     "Western Europe",               "Paris",      &["French"],                                  Some("Coq au vin, Pot-au-feu")),
    ("Germany",    "Western Europe",               "Berlin",     &["German"],                                  Some("Sauerbraten")),
    ("Belgium",    "Western Europe",               "Brussels",   &["Dutch", "French", "German"],               Some("Moules-frites")),
    ("Luxembourg", "Western Europe",               "Luxembourg", &["Luxembourgish", "French", "German"],       Some("Judd mat Gaardebounen")),
    ("Spain",      "Southern Europe",              "Madrid",     &["Spanish", "Catalan", "Galician", "Basque"], Some("Paella")),
    ("Italy",      "Southern Europe",              "Rome",       &["Italian"],                                 Some("Pasta")),
    ("Portugal",   "Southern Europe",              "Lisbon",     &["Portuguese"],                              Some("Cozido a portuguesa")),
    ("Greece",     "Southern Europe",              "Athens",     &["Greek"],                                   Some("Moussaka")),
    ("Sweden",     "Nordic Countries",             "Stockholm",  &["Swedish"],                                 Some("Kottbullar")),
    ("Norway",     "Nordic Countries",             "Oslo",       &["Norwegian"],                               Some("Farikal")),
    ("Finland",    "Nordic Countries",             "Helsinki",   &["Finnish", "Swedish"],                      Some("Karjalanpiirakka")),
    ("Poland",     "Eastern Europe",               "Warsaw",     &["Polish"],                                  Some("Bigos, Pierogi")),
    ("Estonia",    "Baltic Countries",             "Tallinn",    &["Estonian"],                                Some("Verivorst")),
    ("Latvia",     "Baltic Countries",             "Riga",       &["Latvian"],                                 Some("Grey peas with bacon")),
    ("Austria",    "Central and Southeast Europe", "Vienna",     &["German"],                                  Some("Wiener Schnitzel")),
    ("Ireland",    "British Isles",                "Dublin",     &["English", "Irish"],                        Some("Irish stew")),
    ("Fiji",       "Melanesia",                    "Suva",       &["Fijian", "English", "Hindi"],              None),
    ("Samoa",      "Polynesia",                    "Apia",       &["Samoan", "English"],                       None),
    ("Tonga",      "Polynesia",                    "Nuku'alofa", &["Tongan", "English"],                       None),
    ("Australia",  "Australia and New Zealand",    "Canberra",   &["English"],                                 None),
    ("Japan",      "Eastern Asia",                 "Tokyo",      &["Japanese"],                                Some("Sushi")),
    ("Thailand",   "Southeast Asia",               "Bangkok",    &["Thai"],                                    Some("Pad thai")),
    ("Morocco",    "Northern Africa",              "Rabat",      &["Arabic", "Berber"],                        Some("Couscous")),
    ("Peru",       "South America",                "Lima",       &["Spanish", "Quechua"],                      Some("Ceviche")),
];

pub fn fixture_data() -> ReferenceData {
    let location = ROWS
        .iter()
        .map(|(c, minor, ..)| SourceRecord::new(*c, Some(vec![*minor])))
        .collect();
    let capital = ROWS
        .iter()
        .map(|(c, _, cap, ..)| SourceRecord::new(*c, Some(vec![*cap])))
        .collect();
    let languages = ROWS
        .iter()
        .map(|(c, _, _, langs, _)| SourceRecord::new(*c, Some(langs.to_vec())))
        .collect();
    let dishes = ROWS
        .iter()
        .map(|(c, .., dish)| SourceRecord {
            country: c.to_string(),
            items: dish.map(|d| d.split(',').map(|s| s.trim().to_string()).collect()),
        })
        .collect();

    ReferenceData::from_records([
        (Source::Location, location),
        (Source::Capital, capital),
        (Source::Languages, languages),
        (Source::Dishes, dishes),
    ])
}

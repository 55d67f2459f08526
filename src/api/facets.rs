// Airwaves - facets.rs
// Copyright (C) 2021  The Airwaves developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CountryInfo {
    pub name: String,
    pub stationcount: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TagInfo {
    pub name: String,
    pub stationcount: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LanguageInfo {
    pub name: String,
    pub iso_639: Option<String>,
    pub stationcount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_facets() {
        let countries: Vec<CountryInfo> = serde_json::from_str(r#"[{"name":"US","stationcount":6012},{"name":"FR"}]"#).unwrap();
        assert_eq!(countries[0].stationcount, 6012);
        assert_eq!(countries[1].stationcount, 0);

        let languages: Vec<LanguageInfo> = serde_json::from_str(r#"[{"name":"english","iso_639":"en","stationcount":8}, {"name":"klingon","iso_639":null}]"#).unwrap();
        assert_eq!(languages[0].iso_639.as_deref(), Some("en"));
        assert_eq!(languages[1].iso_639, None);

        let tags: Vec<TagInfo> = serde_json::from_str(r#"[{"name":"jazz","stationcount":1433}]"#).unwrap();
        assert_eq!(tags[0].name, "jazz");
    }
}

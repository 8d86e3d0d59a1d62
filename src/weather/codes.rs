//! WMO weather code descriptions (Turkish)

/// Description used for codes outside the table
pub const UNKNOWN_DESCRIPTION: &str = "Bilinmeyen";

/// Convert an Open-Meteo weather code to a Turkish description
#[must_use]
pub fn weather_code_to_description(code: i64) -> &'static str {
    match code {
        0 => "Açık",
        1 => "Çoğunlukla Açık",
        2 => "Parçalı Bulutlu",
        3 => "Bulutlu",
        45 => "Sisli",
        48 => "Yoğun Sisli",
        51 => "Hafif Çisenti",
        53 => "Çisenti",
        55 => "Yoğun Çisenti",
        56 => "Dondurucu Hafif Çisenti",
        57 => "Dondurucu Yoğun Çisenti",
        61 => "Hafif Yağmur",
        63 => "Yağmur",
        65 => "Şiddetli Yağmur",
        66 => "Dondurucu Hafif Yağmur",
        67 => "Dondurucu Şiddetli Yağmur",
        71 => "Hafif Kar",
        73 => "Kar",
        75 => "Yoğun Kar",
        77 => "Kar Taneleri",
        80 => "Hafif Sağanak",
        81 => "Sağanak",
        82 => "Şiddetli Sağanak",
        85 => "Hafif Kar Sağanağı",
        86 => "Şiddetli Kar Sağanağı",
        95 => "Gök Gürültülü Fırtına",
        96 => "Dolu ile Gök Gürültülü Fırtına",
        99 => "Şiddetli Dolu ile Gök Gürültülü Fırtına",
        _ => UNKNOWN_DESCRIPTION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, "Açık")]
    #[case(1, "Çoğunlukla Açık")]
    #[case(2, "Parçalı Bulutlu")]
    #[case(3, "Bulutlu")]
    #[case(45, "Sisli")]
    #[case(48, "Yoğun Sisli")]
    #[case(51, "Hafif Çisenti")]
    #[case(53, "Çisenti")]
    #[case(55, "Yoğun Çisenti")]
    #[case(56, "Dondurucu Hafif Çisenti")]
    #[case(57, "Dondurucu Yoğun Çisenti")]
    #[case(61, "Hafif Yağmur")]
    #[case(63, "Yağmur")]
    #[case(65, "Şiddetli Yağmur")]
    #[case(66, "Dondurucu Hafif Yağmur")]
    #[case(67, "Dondurucu Şiddetli Yağmur")]
    #[case(71, "Hafif Kar")]
    #[case(73, "Kar")]
    #[case(75, "Yoğun Kar")]
    #[case(77, "Kar Taneleri")]
    #[case(80, "Hafif Sağanak")]
    #[case(81, "Sağanak")]
    #[case(82, "Şiddetli Sağanak")]
    #[case(85, "Hafif Kar Sağanağı")]
    #[case(86, "Şiddetli Kar Sağanağı")]
    #[case(95, "Gök Gürültülü Fırtına")]
    #[case(96, "Dolu ile Gök Gürültülü Fırtına")]
    #[case(99, "Şiddetli Dolu ile Gök Gürültülü Fırtına")]
    fn test_known_codes(#[case] code: i64, #[case] expected: &str) {
        assert_eq!(weather_code_to_description(code), expected);
    }

    #[rstest]
    #[case(4)]
    #[case(50)]
    #[case(100)]
    #[case(-1)]
    fn test_unknown_codes(#[case] code: i64) {
        assert_eq!(weather_code_to_description(code), "Bilinmeyen");
    }
}

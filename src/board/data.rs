//! Static data for the standard 48-city world map.

use crate::core::Colour;

/// City names and colours. Index in this table is the city's `CityId`.
pub(super) const CITIES: [(&str, Colour); 48] = [
    // Blue
    ("Atlanta", Colour::Blue),
    ("Chicago", Colour::Blue),
    ("Essen", Colour::Blue),
    ("London", Colour::Blue),
    ("Madrid", Colour::Blue),
    ("Milan", Colour::Blue),
    ("Montreal", Colour::Blue),
    ("New York", Colour::Blue),
    ("Paris", Colour::Blue),
    ("San Francisco", Colour::Blue),
    ("St. Petersburg", Colour::Blue),
    ("Washington", Colour::Blue),
    // Yellow
    ("Bogota", Colour::Yellow),
    ("Buenos Aires", Colour::Yellow),
    ("Johannesburg", Colour::Yellow),
    ("Khartoum", Colour::Yellow),
    ("Kinshasa", Colour::Yellow),
    ("Lagos", Colour::Yellow),
    ("Lima", Colour::Yellow),
    ("Los Angeles", Colour::Yellow),
    ("Mexico City", Colour::Yellow),
    ("Miami", Colour::Yellow),
    ("Santiago", Colour::Yellow),
    ("Sao Paulo", Colour::Yellow),
    // Black
    ("Algiers", Colour::Black),
    ("Baghdad", Colour::Black),
    ("Cairo", Colour::Black),
    ("Chennai", Colour::Black),
    ("Delhi", Colour::Black),
    ("Istanbul", Colour::Black),
    ("Karachi", Colour::Black),
    ("Kolkata", Colour::Black),
    ("Moscow", Colour::Black),
    ("Mumbai", Colour::Black),
    ("Riyadh", Colour::Black),
    ("Tehran", Colour::Black),
    // Red
    ("Bangkok", Colour::Red),
    ("Beijing", Colour::Red),
    ("Ho Chi Minh City", Colour::Red),
    ("Hong Kong", Colour::Red),
    ("Jakarta", Colour::Red),
    ("Manila", Colour::Red),
    ("Osaka", Colour::Red),
    ("Seoul", Colour::Red),
    ("Shanghai", Colour::Red),
    ("Sydney", Colour::Red),
    ("Taipei", Colour::Red),
    ("Tokyo", Colour::Red),
];

/// Undirected connections, each listed once.
pub(super) const CONNECTIONS: [(&str, &str); 93] = [
    ("Atlanta", "Chicago"),
    ("Atlanta", "Washington"),
    ("Atlanta", "Miami"),
    ("Chicago", "San Francisco"),
    ("Chicago", "Los Angeles"),
    ("Chicago", "Mexico City"),
    ("Chicago", "Montreal"),
    ("Essen", "London"),
    ("Essen", "Paris"),
    ("Essen", "Milan"),
    ("Essen", "St. Petersburg"),
    ("London", "New York"),
    ("London", "Madrid"),
    ("London", "Paris"),
    ("Madrid", "New York"),
    ("Madrid", "Paris"),
    ("Madrid", "Algiers"),
    ("Madrid", "Sao Paulo"),
    ("Milan", "Paris"),
    ("Milan", "Istanbul"),
    ("Montreal", "Washington"),
    ("Montreal", "New York"),
    ("New York", "Washington"),
    ("Paris", "Algiers"),
    ("San Francisco", "Tokyo"),
    ("San Francisco", "Manila"),
    ("San Francisco", "Los Angeles"),
    ("St. Petersburg", "Istanbul"),
    ("St. Petersburg", "Moscow"),
    ("Washington", "Miami"),
    ("Bogota", "Miami"),
    ("Bogota", "Mexico City"),
    ("Bogota", "Lima"),
    ("Bogota", "Buenos Aires"),
    ("Bogota", "Sao Paulo"),
    ("Buenos Aires", "Sao Paulo"),
    ("Johannesburg", "Kinshasa"),
    ("Johannesburg", "Khartoum"),
    ("Khartoum", "Cairo"),
    ("Khartoum", "Lagos"),
    ("Khartoum", "Kinshasa"),
    ("Kinshasa", "Lagos"),
    ("Lagos", "Sao Paulo"),
    ("Lima", "Mexico City"),
    ("Lima", "Santiago"),
    ("Los Angeles", "Mexico City"),
    ("Los Angeles", "Sydney"),
    ("Mexico City", "Miami"),
    ("Algiers", "Istanbul"),
    ("Algiers", "Cairo"),
    ("Baghdad", "Istanbul"),
    ("Baghdad", "Tehran"),
    ("Baghdad", "Karachi"),
    ("Baghdad", "Riyadh"),
    ("Baghdad", "Cairo"),
    ("Cairo", "Istanbul"),
    ("Cairo", "Riyadh"),
    ("Chennai", "Mumbai"),
    ("Chennai", "Delhi"),
    ("Chennai", "Kolkata"),
    ("Chennai", "Bangkok"),
    ("Chennai", "Jakarta"),
    ("Delhi", "Tehran"),
    ("Delhi", "Karachi"),
    ("Delhi", "Mumbai"),
    ("Delhi", "Kolkata"),
    ("Istanbul", "Moscow"),
    ("Karachi", "Tehran"),
    ("Karachi", "Riyadh"),
    ("Karachi", "Mumbai"),
    ("Kolkata", "Bangkok"),
    ("Kolkata", "Hong Kong"),
    ("Moscow", "Tehran"),
    ("Bangkok", "Jakarta"),
    ("Bangkok", "Ho Chi Minh City"),
    ("Bangkok", "Hong Kong"),
    ("Beijing", "Seoul"),
    ("Beijing", "Shanghai"),
    ("Ho Chi Minh City", "Jakarta"),
    ("Ho Chi Minh City", "Hong Kong"),
    ("Ho Chi Minh City", "Manila"),
    ("Hong Kong", "Manila"),
    ("Hong Kong", "Taipei"),
    ("Hong Kong", "Shanghai"),
    ("Jakarta", "Sydney"),
    ("Manila", "Taipei"),
    ("Manila", "Sydney"),
    ("Osaka", "Tokyo"),
    ("Osaka", "Taipei"),
    ("Seoul", "Shanghai"),
    ("Seoul", "Tokyo"),
    ("Shanghai", "Tokyo"),
    ("Shanghai", "Taipei"),
];

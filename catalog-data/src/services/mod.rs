pub mod wikidata;

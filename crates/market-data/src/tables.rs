//! Static reference data served by the mock provider.

pub struct ListedSymbol {
    pub symbol: &'static str,
    pub name: &'static str,
    pub security_type: &'static str,
    pub region: &'static str,
}

pub struct StockRow {
    pub symbol: &'static str,
    pub name: &'static str,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub volume: u64,
}

pub struct NewsRow {
    pub id: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub url: &'static str,
    pub source: &'static str,
    /// Unix seconds
    pub published_at: i64,
    pub sentiment: f64,
    pub symbols: &'static [&'static str],
}

const fn listed(symbol: &'static str, name: &'static str) -> ListedSymbol {
    ListedSymbol {
        symbol,
        name,
        security_type: "Equity",
        region: "United States",
    }
}

pub static SEARCH_TABLE: [ListedSymbol; 10] = [
    listed("AAPL", "Apple Inc."),
    listed("MSFT", "Microsoft Corporation"),
    listed("GOOGL", "Alphabet Inc."),
    listed("AMZN", "Amazon.com Inc."),
    listed("META", "Meta Platforms Inc."),
    listed("TSLA", "Tesla Inc."),
    listed("NVDA", "NVIDIA Corporation"),
    listed("JPM", "JPMorgan Chase & Co."),
    listed("V", "Visa Inc."),
    listed("JNJ", "Johnson & Johnson"),
];

pub static STOCK_TABLE: [StockRow; 8] = [
    StockRow { symbol: "AAPL", name: "Apple Inc.", price: 182.52, change: 1.23, change_percent: 0.68, open: 181.29, high: 183.12, low: 180.87, volume: 58_432_100 },
    StockRow { symbol: "MSFT", name: "Microsoft Corporation", price: 417.88, change: -2.34, change_percent: -0.56, open: 420.22, high: 421.15, low: 416.43, volume: 23_567_800 },
    StockRow { symbol: "GOOGL", name: "Alphabet Inc.", price: 174.13, change: 0.87, change_percent: 0.50, open: 173.26, high: 175.21, low: 172.89, volume: 19_876_500 },
    StockRow { symbol: "AMZN", name: "Amazon.com Inc.", price: 178.75, change: -1.05, change_percent: -0.58, open: 179.80, high: 180.42, low: 177.98, volume: 32_145_600 },
    StockRow { symbol: "META", name: "Meta Platforms Inc.", price: 474.99, change: 3.45, change_percent: 0.73, open: 471.54, high: 476.21, low: 470.88, volume: 15_678_900 },
    StockRow { symbol: "TSLA", name: "Tesla Inc.", price: 248.42, change: -5.67, change_percent: -2.23, open: 254.09, high: 255.32, low: 247.65, volume: 87_654_300 },
    StockRow { symbol: "NVDA", name: "NVIDIA Corporation", price: 116.21, change: 2.34, change_percent: 2.05, open: 113.87, high: 117.45, low: 113.56, volume: 65_432_100 },
    StockRow { symbol: "JPM", name: "JPMorgan Chase & Co.", price: 198.56, change: 0.78, change_percent: 0.39, open: 197.78, high: 199.23, low: 197.45, volume: 12_345_600 },
];

pub static NEWS_TABLE: [NewsRow; 8] = [
    NewsRow {
        id: "apple-unveils-new-iphone",
        title: "Apple Unveils New iPhone with Revolutionary AI Features",
        summary: "Apple Inc. has announced its latest iPhone model featuring groundbreaking AI capabilities that could reshape the smartphone industry. The new device includes enhanced neural processing and advanced machine learning algorithms.",
        url: "https://example.com/news/apple-new-iphone",
        source: "Tech Today",
        published_at: 1_694_529_000, // 2023-09-12T14:30:00Z
        sentiment: 0.8,
        symbols: &["AAPL"],
    },
    NewsRow {
        id: "microsoft-cloud-growth",
        title: "Microsoft Cloud Business Sees Unprecedented Growth in Q2",
        summary: "Microsoft reported exceptional growth in its cloud services division, with Azure revenue increasing by 27% year-over-year. The company attributes this success to increased enterprise adoption and expanded AI capabilities.",
        url: "https://example.com/news/microsoft-cloud-growth",
        source: "Business Insider",
        published_at: 1_690_280_100,
        sentiment: 0.6,
        symbols: &["MSFT"],
    },
    NewsRow {
        id: "google-antitrust-concerns",
        title: "Google Faces New Antitrust Scrutiny Over AI Search Integration",
        summary: "Alphabet's Google is under investigation by regulators concerned about potential anticompetitive practices related to the integration of its AI technology in search results. The company maintains that its practices benefit consumers.",
        url: "https://example.com/news/google-antitrust",
        source: "Wall Street Journal",
        published_at: 1_691_253_900,
        sentiment: -0.4,
        symbols: &["GOOGL"],
    },
    NewsRow {
        id: "amazon-expands-healthcare",
        title: "Amazon Expands Healthcare Initiative with New Acquisitions",
        summary: "Amazon is strengthening its position in the healthcare sector through strategic acquisitions of telemedicine providers and pharmacy services. Analysts see this as a significant move to disrupt the traditional healthcare industry.",
        url: "https://example.com/news/amazon-healthcare",
        source: "Healthcare Daily",
        published_at: 1_692_351_000,
        sentiment: 0.5,
        symbols: &["AMZN"],
    },
    NewsRow {
        id: "meta-metaverse-progress",
        title: "Meta's Metaverse Investment Shows First Signs of Profitability",
        summary: "After years of heavy investment, Meta Platforms is beginning to see returns from its metaverse initiatives. The company reported increased user engagement and growing revenue streams from virtual reality products and services.",
        url: "https://example.com/news/meta-metaverse",
        source: "Tech Crunch",
        published_at: 1_693_653_600,
        sentiment: 0.7,
        symbols: &["META"],
    },
    NewsRow {
        id: "tesla-production-challenges",
        title: "Tesla Faces Production Challenges Amid Supply Chain Disruptions",
        summary: "Tesla is experiencing production delays at its gigafactories due to ongoing supply chain issues and raw material shortages. The company has revised its delivery estimates for the quarter, potentially impacting annual targets.",
        url: "https://example.com/news/tesla-production",
        source: "Auto News",
        published_at: 1_693_230_300,
        sentiment: -0.6,
        symbols: &["TSLA"],
    },
    NewsRow {
        id: "nvidia-ai-chip-demand",
        title: "NVIDIA Cannot Keep Up with Demand for AI Chips",
        summary: "NVIDIA is struggling to meet the extraordinary demand for its AI accelerator chips, with waiting lists extending months for some products. The company is ramping up production capacity but faces constraints in the semiconductor supply chain.",
        url: "https://example.com/news/nvidia-demand",
        source: "Semiconductor Today",
        published_at: 1_694_185_800,
        sentiment: 0.3,
        symbols: &["NVDA"],
    },
    NewsRow {
        id: "jpmorgan-interest-rates",
        title: "JPMorgan CEO Warns of Persistent High Interest Rates",
        summary: "JPMorgan Chase CEO Jamie Dimon cautioned investors that interest rates may remain elevated longer than markets anticipate, citing ongoing inflation concerns and Federal Reserve policy. This could impact lending and investment strategies.",
        url: "https://example.com/news/jpmorgan-rates",
        source: "Financial Times",
        published_at: 1_692_088_200,
        sentiment: -0.2,
        symbols: &["JPM"],
    },
];

pub fn find_stock(symbol: &str) -> Option<&'static StockRow> {
    STOCK_TABLE.iter().find(|row| row.symbol == symbol)
}
